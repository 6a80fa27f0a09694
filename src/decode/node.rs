/// 节点类型
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NodeType {
    /// 整型
    Int,
    /// 字符串
    Str,
    /// 列表
    List,
    /// 字典
    Dict,
}
