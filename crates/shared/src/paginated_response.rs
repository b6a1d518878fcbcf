//! # ページネーション付きレスポンス
//!
//! ページ番号ベースのページネーションに対応したペイロード型。
//!
//! ## JSON 形式
//!
//! 成功エンベロープの `data` の内側に入れ子で配置する:
//!
//! ```json
//! {
//!   "success": true,
//!   "data": {
//!     "data": [...],
//!     "pagination": {
//!       "page": 2,
//!       "page_size": 10,
//!       "total": 25,
//!       "total_pages": 3,
//!       "has_next": true,
//!       "has_prev": true
//!     }
//!   },
//!   "timestamp": "..."
//! }
//! ```

use serde::{Deserialize, Serialize};

/// ページネーション情報
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page:        u64,
    pub page_size:   u64,
    pub total:       u64,
    pub total_pages: u64,
    pub has_next:    bool,
    pub has_prev:    bool,
}

impl Pagination {
    /// ページ番号（1 始まり）、ページサイズ、総件数から算出する
    ///
    /// `page_size` が 0 の場合は総ページ数を 0 とする。
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// ページネーション付きペイロード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data:       T,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: T, page: u64, page_size: u64, total: u64) -> Self {
        Self {
            data,
            pagination: Pagination::new(page, page_size, total),
        }
    }
}
