use bytes::Bytes;

use crate::{BdecodeError, BdecodeResult};

use super::commons::IDENT_LEN;
use super::cursor::ByteCursor;
use super::digest::{self, InfoDigest};
use super::str::decode_str;
use super::utils::{escape_string, gen_blanks};
use super::{BdecodeNode, Style};

/// 初始槽位数, 必须是 2 的幂
const INIT_CAP: usize = 32;
/// FNV1a 32 bit offset
const FNV_OFF: u32 = 2166136261;
/// FNV1a 32 bit prime
const FNV_PRIME: u32 = 16777619;

#[derive(Debug, Clone)]
struct DictEntry {
    key: Bytes,
    value: BdecodeNode,
}

/// 字典节点的值: 一张开放寻址的哈希表。
///
/// 槽位数始终是 2 的幂, 用掩码代替取模; 冲突时线性探测, 遇到相同的 key
/// 原地覆盖。表中始终保留至少一个空槽, 保证探测一定会终止。没有删除
/// 操作。遍历顺序是槽位顺序, 与插入顺序无关。
#[derive(Debug, Clone)]
pub struct BeDict {
    entries: Vec<Option<DictEntry>>,
    length: usize,
    info_digest: Option<InfoDigest>,
}

/// key 字节的 FNV-1a 哈希
pub(crate) fn hash_key(key: &[u8]) -> u32 {
    let mut hash = FNV_OFF;
    for b in key {
        hash ^= *b as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

impl BeDict {
    pub fn new() -> Self {
        Self {
            entries: vec![None; INIT_CAP],
            length: 0,
            info_digest: None,
        }
    }

    /// 字典中的 entry 数量
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// 当前槽位数。不变式: `len() < capacity()` 且 capacity 是 2 的幂。
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// info 字典原始编码字节的摘要, 只有当本字典直接包含 key 为 "info"
    /// 且 value 为字典的 entry 时才存在。
    pub fn info_digest(&self) -> Option<InfoDigest> {
        self.info_digest
    }

    pub fn has_info_digest(&self) -> bool {
        self.info_digest.is_some()
    }

    pub(crate) fn set_info_digest(&mut self, digest: InfoDigest) {
        self.info_digest = Some(digest);
    }

    /// 插入一对 key/value 。
    ///
    /// key 已存在时原地覆盖, 返回被替换掉的旧 value (调用方不接收时
    /// 随即释放); key 不存在时占用探测到的第一个空槽, 返回 None 。
    pub fn set(&mut self, key: Bytes, value: BdecodeNode) -> Option<BdecodeNode> {
        // 始终保留一个空槽, 插入前先扩容
        if self.length >= self.capacity() - 1 {
            self.grow();
        }

        let prev = Self::set_entry(&mut self.entries, key, value);
        if prev.is_none() {
            self.length += 1;
        }
        prev
    }

    /// 在 dict 中查找 key 对应的 value 。
    ///
    /// 沿着与插入相同的探测序列走, 碰到空槽即不存在。
    pub fn find(&self, key: &[u8]) -> Option<&BdecodeNode> {
        let mask = self.capacity() - 1;
        let mut index = hash_key(key) as usize & mask;

        loop {
            match &self.entries[index] {
                Some(entry) if entry.key.as_ref() == key => return Some(&entry.value),
                Some(_) => index = (index + 1) & mask,
                None => return None,
            }
        }
    }

    pub fn find_as_str(&self, key: &[u8]) -> Option<&[u8]> {
        match self.find(key)? {
            BdecodeNode::Str(node) => Some(node.value()),
            _ => None,
        }
    }

    pub fn find_as_int(&self, key: &[u8]) -> Option<i64> {
        match self.find(key)? {
            BdecodeNode::Int(val) => Some(*val),
            _ => None,
        }
    }

    pub fn find_as_list(&self, key: &[u8]) -> Option<&super::BeList> {
        match self.find(key)? {
            BdecodeNode::List(node) => Some(node),
            _ => None,
        }
    }

    pub fn find_as_dict(&self, key: &[u8]) -> Option<&BeDict> {
        match self.find(key)? {
            BdecodeNode::Dict(node) => Some(node),
            _ => None,
        }
    }

    /// 按槽位顺序遍历所有 entry
    pub fn iter(&self) -> impl Iterator<Item = (&Bytes, &BdecodeNode)> {
        self.entries
            .iter()
            .filter_map(|slot| slot.as_ref().map(|e| (&e.key, &e.value)))
    }

    /// 哈希并探测到目标槽位后写入。不维护 length , 由调用方负责。
    fn set_entry(
        entries: &mut [Option<DictEntry>],
        key: Bytes,
        value: BdecodeNode,
    ) -> Option<BdecodeNode> {
        let mask = entries.len() - 1;
        let mut index = hash_key(&key) as usize & mask;

        loop {
            match &mut entries[index] {
                Some(entry) if entry.key == key => {
                    return Some(std::mem::replace(&mut entry.value, value));
                }
                Some(_) => index = (index + 1) & mask,
                None => {
                    entries[index] = Some(DictEntry { key, value });
                    return None;
                }
            }
        }
    }

    /// 槽位数翻倍, 所有 entry 重新哈希插入新表
    fn grow(&mut self) {
        let new_cap = self.capacity() * 2;
        let mut new_entries: Vec<Option<DictEntry>> = vec![None; new_cap];

        for slot in self.entries.drain(..) {
            if let Some(entry) = slot {
                Self::set_entry(&mut new_entries, entry.key, entry.value);
            }
        }

        self.entries = new_entries;
    }

    /// 解析整个 buffer , 要求顶层节点是一个字典。
    pub fn parse_buffer(buffer: &[u8]) -> BdecodeResult<BeDict> {
        match BdecodeNode::parse_buffer(buffer)? {
            BdecodeNode::Dict(dict) => Ok(dict),
            _ => Err(BdecodeError::ExpectedDict),
        }
    }

    pub fn to_json_with_style(&self, style: Style) -> String {
        let len = self.len();
        let mut sb = String::new();

        match style {
            Style::Compact => {
                for (i, (key, val)) in self.iter().enumerate() {
                    sb.push_str(&format!(
                        r#""{}": {}"#,
                        escape_string(key),
                        val.to_json_with_style(Style::Compact)
                    ));

                    if i < len - 1 {
                        sb.push_str(", ");
                    }
                }

                format!("{} {} {}", "{", sb, "}")
            }
            Style::Pretty(level) => {
                if self.is_empty() {
                    return "{}".into();
                }

                let pad = gen_blanks((level + 1) * IDENT_LEN);
                for (i, (key, val)) in self.iter().enumerate() {
                    sb.push_str(&format!(
                        r#"{}"{}": {}"#,
                        pad,
                        escape_string(key),
                        val.to_json_with_style(Style::Pretty(level + 1))
                    ));

                    if i < len - 1 {
                        sb.push(',');
                    }
                    sb.push('\n');
                }

                format!("{{\n{}{}}}", sb, gen_blanks(level * IDENT_LEN))
            }
        }
    }

    pub fn to_json(&self) -> String {
        self.to_json_with_style(Style::Compact)
    }

    pub fn to_json_pretty(&self) -> String {
        self.to_json_with_style(Style::Pretty(0))
    }
}

impl Default for BeDict {
    fn default() -> Self {
        Self::new()
    }
}

/// 解析一个字典节点。游标已经越过开头的 'd' , 返回时越过结尾的 'e' 。
///
/// 每一对 entry 先解析一个字符串 key (任何失败都是致命的), 再记下 value
/// 开始前的游标位置并解析 value ; value 的原始编码片段随后交给
/// digest hook 。任何一步失败, 已经建好的部分随之释放。
pub(crate) fn decode_dict(cursor: &mut ByteCursor, depth: usize) -> BdecodeResult<BeDict> {
    let mut dict = BeDict::new();

    loop {
        match cursor.peek() {
            None => return Err(BdecodeError::UnexpectedEof(cursor.pos())),
            Some(b'e') => {
                // skip 'e'
                cursor.advance(1);
                return Ok(dict);
            }
            Some(_) => (),
        }

        let key = decode_str(cursor)?.into_bytes();

        if cursor.remaining() == 0 {
            return Err(BdecodeError::UnexpectedEof(cursor.pos()));
        }

        let val_start = cursor.pos();
        let value = BdecodeNode::decode_at(cursor, depth)?;
        let node_type = value.node_type();

        dict.set(key.clone(), value);
        digest::value_span_hook(&mut dict, &key, cursor.span(val_start), node_type);
    }
}
