use std::fmt;

use sha1::{Digest, Sha1};

use super::{dict::BeDict, node::NodeType};

/// info 字典在 buffer 中原始编码字节的 sha1 摘要 (20 字节)。
///
/// 摘要必须基于线上的原始字节计算, 而不是解析后的树的重新编码。
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct InfoDigest([u8; 20]);

impl InfoDigest {
    /// 计算给定字节片段的摘要
    pub fn of(span: &[u8]) -> Self {
        InfoDigest(Sha1::digest(span).into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0
            .iter()
            .fold(String::with_capacity(40), |mut s, b| {
                use std::fmt::Write;
                let _ = write!(s, "{:02x}", b);
                s
            })
    }
}

impl fmt::Debug for InfoDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoDigest({})", self.to_hex())
    }
}

impl fmt::Display for InfoDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// dict 解析中每个 value 解析完成后调用的 hook 。
///
/// span 是该 value 在 buffer 中的原始编码字节 (包括它自己的分隔符)。
/// 目前唯一的规则: key 为 "info" 且 value 是字典时, 在外层字典上记录
/// 该片段的 sha1 摘要。新的 "对某个 key 的原始片段做摘要" 规则加在这里,
/// 不用改动解析调度。
pub(crate) fn value_span_hook(dict: &mut BeDict, key: &[u8], span: &[u8], node_type: NodeType) {
    if key == b"info" && node_type == NodeType::Dict {
        dict.set_info_digest(InfoDigest::of(span));
    }
}
