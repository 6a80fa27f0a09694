use crate::{BdecodeError, BdecodeResult};

use super::{cursor::ByteCursor, utils::parse_uint};

/// 解析一个整数节点的值。游标已经越过开头的 'i' , 返回时越过结尾的 'e' 。
pub(crate) fn decode_int(cursor: &mut ByteCursor) -> BdecodeResult<i64> {
    let negative = if cursor.peek() == Some(b'-') {
        cursor.advance(1);
        true
    } else {
        false
    };

    let val = parse_uint(cursor, b'e')?;

    if cursor.peek().is_none() {
        return Err(BdecodeError::UnexpectedEof(cursor.pos()));
    }

    // skip 'e'
    cursor.advance(1);

    if negative {
        Ok(-val)
    } else {
        Ok(val)
    }
}
