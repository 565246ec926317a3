//! 域名名称处理

/// 去掉域名末尾的点并转为小写
pub fn normalize_domain_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// 判断两个域名是否相同（忽略大小写和末尾的点）
pub fn same_domain(a: &str, b: &str) -> bool {
    normalize_domain_name(a) == normalize_domain_name(b)
}
