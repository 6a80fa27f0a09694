use crate::{BdecodeError, BdecodeResult};

use super::cursor::ByteCursor;

/// 解析游标处的无符号十进制数, 当遇到 delimiter 字符或 buffer 结尾时停止。
/// delimiter 本身不被消费, 由调用方检查并跳过。
pub(crate) fn parse_uint(cursor: &mut ByteCursor, delimiter: u8) -> BdecodeResult<i64> {
    let mut val: i64 = 0;

    while let Some(t) = cursor.peek() {
        if t == delimiter {
            break;
        }

        if !t.is_ascii_digit() {
            return Err(BdecodeError::ExpectedDigit(cursor.pos()));
        }

        // 检查 val * 10 是否会溢出
        if val > i64::MAX / 10 {
            return Err(BdecodeError::Overflow(format!("{val}0")));
        }
        val *= 10;

        let digit = (t - b'0') as i64;
        // 检查 val + digit 是否会溢出
        if val > i64::MAX - digit {
            return Err(BdecodeError::Overflow(format!(
                "{}",
                val as u64 + digit as u64
            )));
        }

        val += digit;
        cursor.advance(1);
    }

    Ok(val)
}

pub(crate) fn gen_blanks(span: usize) -> String {
    if span == 0 {
        "".into()
    } else {
        " ".repeat(span)
    }
}

pub fn escape_char(byte: u8) -> String {
    match byte {
        b' ' => " ".into(),
        b'"' => format!("\\x{:02x}", byte),
        _ if byte.is_ascii_graphic() => format!("{}", byte as char),
        _ => format!("\\x{:02x}", byte),
    }
}

pub fn escape_string(bytes: &[u8]) -> String {
    let mut result = String::new();
    for c in bytes.iter() {
        result.push_str(&escape_char(*c));
    }

    result
}
