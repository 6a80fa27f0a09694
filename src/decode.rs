mod commons;
mod cursor;
mod dict;
mod digest;
mod int;
mod list;
mod node;
mod str;
mod utils;

use commons::limits;
use int::decode_int;
use str::decode_str;

pub use {cursor::*, dict::*, digest::*, list::*, node::*, str::*};

use crate::{BdecodeError, BdecodeResult};

#[derive(PartialEq, Eq)]
pub enum Style {
    Compact,
    Pretty(usize),
}

/// 用于存放解析后的数据
#[derive(Debug, Clone)]
pub enum BdecodeNode {
    Int(i64),
    Str(BeStr),
    List(BeList),
    Dict(BeDict),
}

impl BdecodeNode {
    /// 从游标处解析一个节点, 按开头字节分派到四种节点类型之一。
    ///
    /// 成功时游标正好越过该节点的全部编码字节; 失败时已经建好的
    /// 部分结构随错误一起释放, 游标不再可用。
    pub fn decode(cursor: &mut ByteCursor) -> BdecodeResult<BdecodeNode> {
        Self::decode_at(cursor, limits::DEFAULT_DEPTH_LIMIT)
    }

    pub(crate) fn decode_at(cursor: &mut ByteCursor, depth: usize) -> BdecodeResult<BdecodeNode> {
        if depth == 0 {
            return Err(BdecodeError::DepthExceeded(cursor.pos()));
        }

        let node = match cursor.peek() {
            None => return Err(BdecodeError::UnexpectedEof(cursor.pos())),
            Some(b'i') => {
                // skip 'i'
                cursor.advance(1);
                BdecodeNode::Int(decode_int(cursor)?)
            }
            Some(b'l') => {
                cursor.advance(1);
                BdecodeNode::List(decode_list(cursor, depth - 1)?)
            }
            Some(b'd') => {
                cursor.advance(1);
                BdecodeNode::Dict(decode_dict(cursor, depth - 1)?)
            }
            Some(t) if t.is_ascii_digit() => BdecodeNode::Str(decode_str(cursor)?),
            Some(_) => return Err(BdecodeError::ExpectedValue(cursor.pos())),
        };

        Ok(node)
    }

    /// 解析整个 buffer 。字符串内容是拷贝出来的, 返回后 buffer 即可释放。
    /// 顶层节点之后的多余字节会被忽略。
    pub fn parse(buffer: &[u8], depth_limit: Option<usize>) -> BdecodeResult<Self> {
        let depth_limit = depth_limit.unwrap_or(limits::DEFAULT_DEPTH_LIMIT);

        let mut cursor = ByteCursor::new(buffer);
        Self::decode_at(&mut cursor, depth_limit)
    }

    pub fn parse_buffer(buffer: &[u8]) -> BdecodeResult<Self> {
        Self::parse(buffer, None)
    }

    /// 获取当前节点的类型
    pub fn node_type(&self) -> NodeType {
        match self {
            BdecodeNode::Int(_) => NodeType::Int,
            BdecodeNode::Str(_) => NodeType::Str,
            BdecodeNode::List(_) => NodeType::List,
            BdecodeNode::Dict(_) => NodeType::Dict,
        }
    }

    pub fn as_int(&self) -> i64 {
        let BdecodeNode::Int(val) = self else {
            panic!("not a Int node")
        };

        *val
    }

    pub fn as_str(&self) -> &[u8] {
        let BdecodeNode::Str(inner_node) = self else {
            panic!("not a Str node")
        };

        inner_node.value()
    }

    pub fn as_list(&self) -> &BeList {
        let BdecodeNode::List(inner_node) = self else {
            panic!("not a List node")
        };

        inner_node
    }

    pub fn as_dict(&self) -> &BeDict {
        let BdecodeNode::Dict(inner_node) = self else {
            panic!("not a Dict node")
        };

        inner_node
    }

    pub fn len(&self) -> usize {
        use BdecodeNode::*;

        match self {
            List(inner_node) => inner_node.len(),
            Dict(inner_node) => inner_node.len(),
            _ => panic!("not a List or Dict node"),
        }
    }

    pub fn list_item(&self, index: usize) -> &BdecodeNode {
        self.as_list().item(index)
    }

    pub fn list_item_as_int(&self, index: usize) -> i64 {
        self.as_list().item(index).as_int()
    }

    pub fn list_item_as_str(&self, index: usize) -> &[u8] {
        self.as_list().item(index).as_str()
    }

    pub fn dict_find(&self, key: &[u8]) -> Option<&BdecodeNode> {
        self.as_dict().find(key)
    }

    pub fn dict_find_as_str(&self, key: &[u8]) -> Option<&[u8]> {
        self.as_dict().find_as_str(key)
    }

    pub fn dict_find_as_int(&self, key: &[u8]) -> Option<i64> {
        self.as_dict().find_as_int(key)
    }

    pub fn dict_find_as_list(&self, key: &[u8]) -> Option<&BeList> {
        self.as_dict().find_as_list(key)
    }

    pub fn dict_find_as_dict(&self, key: &[u8]) -> Option<&BeDict> {
        self.as_dict().find_as_dict(key)
    }

    pub fn to_json_with_style(&self, style: Style) -> String {
        match self {
            BdecodeNode::Int(val) => val.to_string(),
            BdecodeNode::Str(inner_node) => inner_node.to_json_with_style(style),
            BdecodeNode::List(inner_node) => inner_node.to_json_with_style(style),
            BdecodeNode::Dict(inner_node) => inner_node.to_json_with_style(style),
        }
    }

    pub fn to_json(&self) -> String {
        self.to_json_with_style(Style::Compact)
    }

    pub fn to_json_pretty(&self) -> String {
        self.to_json_with_style(Style::Pretty(0))
    }
}

#[cfg(test)]
mod tests {
    use sha1::{Digest, Sha1};

    use super::*;

    #[test]
    fn test_parse_str_node() {
        let node = BdecodeNode::parse_buffer(b"4:spam").unwrap();
        let BdecodeNode::Str(node) = &node else {
            panic!("not a Str node");
        };
        assert_eq!(4, node.len());
        assert_eq!(b"spam", node.value());

        let node = BdecodeNode::parse_buffer(b"0:").unwrap();
        assert_eq!(b"", node.as_str());
    }

    #[test]
    fn test_parse_int_node() {
        // 0 是一个合法的整数值, 和解析失败是两回事
        let node = BdecodeNode::parse_buffer(b"i0e").unwrap();
        assert!(matches!(node, BdecodeNode::Int(0)));

        let node = BdecodeNode::parse_buffer(b"i-3e").unwrap();
        assert_eq!(-3, node.as_int());

        let node = BdecodeNode::parse_buffer(b"i19e").unwrap();
        assert_eq!(19, node.as_int());

        assert!(matches!(
            BdecodeNode::parse_buffer(b"i3"),
            Err(BdecodeError::UnexpectedEof(_))
        ));

        // 原实现中空的数字串解析为 0
        assert_eq!(0, BdecodeNode::parse_buffer(b"ie").unwrap().as_int());
    }

    #[test]
    fn test_parse_empty_containers() {
        let node = BdecodeNode::parse_buffer(b"le").unwrap();
        let BdecodeNode::List(list) = &node else {
            panic!("not a List node");
        };
        assert!(list.is_empty());

        let dict = BeDict::parse_buffer(b"de").unwrap();
        assert!(dict.is_empty());
        assert!(!dict.has_info_digest());
    }

    #[test]
    fn test_parse_nesting_and_order() {
        let dict = BeDict::parse_buffer(b"d4:spaml1:a1:bee").unwrap();
        assert_eq!(1, dict.len());

        let list = dict.find_as_list(b"spam").unwrap();
        assert_eq!(2, list.len());
        assert_eq!(b"a", list.item(0).as_str());
        assert_eq!(b"b", list.item(1).as_str());
    }

    #[test]
    fn test_parse_nested_dict() {
        // {"k1": "v1", "k2": [1, 2], "k03": 3, "k4": {"k5": 5, "k6": 6}}
        let buffer =
            "d 2:k1 2:v1 2:k2 l i1e i2e e 3:k03 i3e 2:k4 d 2:k5 i5e 2:k6 i6e e e".replace(" ", "");
        let node = BdecodeNode::parse_buffer(buffer.as_bytes()).unwrap();
        assert_eq!(4, node.len());

        assert_eq!(b"v1", node.dict_find_as_str(b"k1").unwrap());
        assert_eq!(3, node.dict_find_as_int(b"k03").unwrap());

        let k2 = node.dict_find(b"k2").unwrap();
        assert!(matches!(k2, BdecodeNode::List(_)));
        assert_eq!(1, k2.list_item_as_int(0));
        assert_eq!(2, k2.list_item_as_int(1));

        let k4 = node.dict_find_as_dict(b"k4").unwrap();
        assert_eq!(5, k4.find_as_int(b"k5").unwrap());
        assert_eq!(6, k4.find_as_int(b"k6").unwrap());

        assert!(node.dict_find(b"k9").is_none());
        assert!(node.dict_find_as_int(b"k1").is_none());
    }

    #[test]
    fn test_info_digest() {
        let dict = BeDict::parse_buffer(b"d4:infod4:name3:fooee").unwrap();
        assert!(dict.has_info_digest());

        // 摘要基于 "info" 的 value 在 buffer 中的原始字节 "d4:name3:fooe"
        let expected = Sha1::digest(b"d4:name3:fooe");
        assert_eq!(
            expected.as_slice(),
            dict.info_digest().unwrap().as_bytes()
        );

        // 内层的 info 字典自身没有摘要
        let inner = dict.find_as_dict(b"info").unwrap();
        assert!(!inner.has_info_digest());
    }

    #[test]
    fn test_info_digest_requires_dict_value() {
        // "info" 的 value 不是字典时不计算摘要
        let dict = BeDict::parse_buffer(b"d4:infoi3ee").unwrap();
        assert!(!dict.has_info_digest());

        // key 不是 "info" 时也不计算
        let dict = BeDict::parse_buffer(b"d4:spamd1:a1:bee").unwrap();
        assert!(!dict.has_info_digest());
    }

    #[test]
    fn test_info_digest_only_on_enclosing_dict() {
        // 摘要落在直接包含 "info" 的那一层字典上
        let buffer = "d 5:outer d 4:info d 4:name 3:foo e e e".replace(" ", "");
        let dict = BeDict::parse_buffer(buffer.as_bytes()).unwrap();
        assert!(!dict.has_info_digest());

        let outer = dict.find_as_dict(b"outer").unwrap();
        assert!(outer.has_info_digest());

        let expected = Sha1::digest(b"d4:name3:fooe");
        assert_eq!(
            expected.as_slice(),
            outer.info_digest().unwrap().as_bytes()
        );
    }

    #[test]
    fn test_duplicate_key_overwrite() {
        let dict = BeDict::parse_buffer(b"d1:ai1e1:ai2ee").unwrap();
        assert_eq!(1, dict.len());
        assert_eq!(2, dict.find_as_int(b"a").unwrap());
    }

    #[test]
    fn test_truncated_buffer_fails() {
        let buffer =
            "d 2:k1 2:v1 2:k2 l i1e i2e e 3:k03 i3e 2:k4 d 2:k5 i5e 2:k6 i6e e e".replace(" ", "");
        let buffer = buffer.as_bytes();
        assert!(BdecodeNode::parse_buffer(buffer).is_ok());

        // 任何位置截断都必须失败, 而不是解析出一个更短的值
        for at in 0..buffer.len() {
            assert!(
                BdecodeNode::parse_buffer(&buffer[..at]).is_err(),
                "truncated at {} should fail",
                at
            );
        }
    }

    #[test]
    fn test_parse_empty_buffer() {
        assert!(matches!(
            BdecodeNode::parse_buffer(b""),
            Err(BdecodeError::UnexpectedEof(0))
        ));
    }

    #[test]
    fn test_parse_unexpected_byte() {
        assert!(matches!(
            BdecodeNode::parse_buffer(b"x"),
            Err(BdecodeError::ExpectedValue(0))
        ));
    }

    #[test]
    fn test_top_level_must_be_dict() {
        assert!(matches!(
            BeDict::parse_buffer(b"4:spam"),
            Err(BdecodeError::ExpectedDict)
        ));
        assert!(BeDict::parse_buffer(b"de").is_ok());
    }

    #[test]
    fn test_depth_limit() {
        let buffer = "l".repeat(200);
        assert!(matches!(
            BdecodeNode::parse_buffer(buffer.as_bytes()),
            Err(BdecodeError::DepthExceeded(_))
        ));

        // 默认限制以内的嵌套正常解析
        let mut buffer = "l".repeat(50);
        buffer.push_str(&"e".repeat(50));
        assert!(BdecodeNode::parse_buffer(buffer.as_bytes()).is_ok());
    }

    #[test]
    fn test_dict_key_must_be_str() {
        // key 位置遇到整数
        assert!(matches!(
            BdecodeNode::parse_buffer(b"di1ei2ee"),
            Err(BdecodeError::ExpectedDigit(1))
        ));
    }

    #[test]
    fn test_dict_missing_value() {
        // key 后面直接遇到 'e'
        assert!(matches!(
            BdecodeNode::parse_buffer(b"d1:ae"),
            Err(BdecodeError::ExpectedValue(4))
        ));
    }

    #[test]
    fn test_cursor_consumption() {
        let mut cursor = ByteCursor::new(b"i7e2:ab");
        let node = BdecodeNode::decode(&mut cursor).unwrap();
        assert_eq!(7, node.as_int());
        // 游标正好停在下一个节点的开头
        assert_eq!(3, cursor.pos());

        let node = BdecodeNode::decode(&mut cursor).unwrap();
        assert_eq!(b"ab", node.as_str());
        assert_eq!(0, cursor.remaining());
    }

    #[test]
    fn test_to_json() {
        let buffer = "d 2:k1 2:v1 2:k2 l i1e i2e e e".replace(" ", "");
        let node = BdecodeNode::parse_buffer(buffer.as_bytes()).unwrap();
        let json = node.to_json();

        // 槽位顺序不定, 逐段检查
        assert!(json.starts_with("{ "));
        assert!(json.ends_with(" }"));
        assert!(json.contains(r#""k1": "v1""#));
        assert!(json.contains(r#""k2": [1, 2]"#));

        let pretty = node.to_json_pretty();
        assert!(pretty.contains("\n"));
        assert!(pretty.contains(r#""k1": "v1""#));
    }
}
