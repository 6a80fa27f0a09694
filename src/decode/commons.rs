/// 阈值常量
pub mod limits {
    /// 解析时 dict 和 list 的最大嵌套深度限制。
    pub const DEFAULT_DEPTH_LIMIT: usize = 100;
}

pub const IDENT_LEN: usize = 4;
