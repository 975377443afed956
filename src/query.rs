//! 查詢後端介面
//!
//! 核心不碰連線與 SQL 執行，宿主實作這個 trait 接上真正的資料庫。
//! 失敗以純文字回報，核心只負責顯示。

/// 一次查詢的表格結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryOutput {
    /// 狀態列用的一行摘要
    pub fn summary(&self) -> String {
        match self.rows.len() {
            1 => "1 row".to_string(),
            n => format!("{} rows", n),
        }
    }
}

pub trait QueryBackend {
    fn execute_query(&mut self, sql: &str) -> Result<QueryOutput, String>;
    fn list_tables(&mut self) -> Result<Vec<String>, String>;
    fn describe_table(&mut self, name: &str) -> Result<QueryOutput, String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_rows() {
        let mut out = QueryOutput::default();
        assert_eq!(out.summary(), "0 rows");
        out.rows.push(vec!["a".into()]);
        assert_eq!(out.summary(), "1 row");
        out.rows.push(vec!["b".into()]);
        assert_eq!(out.summary(), "2 rows");
    }
}
