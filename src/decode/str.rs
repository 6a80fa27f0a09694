use bytes::Bytes;

use crate::{BdecodeError, BdecodeResult};

use super::{cursor::ByteCursor, utils::escape_string, utils::parse_uint, Style};

/// 字符串节点的值。
///
/// 内容是从输入 buffer 中原样拷贝出来的二进制字节, 不保证是合法的文本,
/// 也可能包含 0 字节。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeStr {
    bytes: Bytes,
}

impl BeStr {
    pub fn new(bytes: Bytes) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 获取当前节点的字符串值
    pub fn value(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    pub fn to_json_with_style(&self, _style: Style) -> String {
        format!(r#""{}""#, escape_string(self.value()))
    }

    pub fn to_json(&self) -> String {
        self.to_json_with_style(Style::Compact)
    }
}

/// 解析一个字符串节点。游标位于长度的第一个数字上。
///
/// 格式为 `<len>:<bytes>` : 先解析十进制长度, 紧跟的字节必须是 ':' ,
/// 然后 buffer 中必须还剩至少 len 个字节, 原样拷贝这 len 个字节。
pub(crate) fn decode_str(cursor: &mut ByteCursor) -> BdecodeResult<BeStr> {
    match cursor.peek() {
        Some(t) if t.is_ascii_digit() => (),
        Some(_) => return Err(BdecodeError::ExpectedDigit(cursor.pos())),
        None => return Err(BdecodeError::UnexpectedEof(cursor.pos())),
    }

    let len = parse_uint(cursor, b':')?;

    if cursor.peek().is_none() {
        return Err(BdecodeError::ExpectedColon(cursor.pos()));
    }

    // skip ':'
    cursor.advance(1);

    let bytes = Bytes::copy_from_slice(cursor.take(len as usize)?);
    Ok(BeStr::new(bytes))
}
