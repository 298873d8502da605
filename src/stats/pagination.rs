use serde::Serialize;

use crate::db::Page;

/// Pages shown on each side of the current one.
const WINDOW: i64 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLink {
    pub number: u32,
    /// `None` for the current page.
    pub url: Option<String>,
    pub current: bool,
}

/// Navigation links of a paginated listing.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub pages: Vec<PageLink>,
}

impl Pagination {
    /// `params` are extra query pairs carried by every link.
    pub fn new<T>(page: &Page<T>, base_path: &str, params: &[(&str, &str)]) -> Self {
        let url = |number: u32| {
            let mut url = format!("{base_path}?page={number}");
            for (key, value) in params {
                url.push('&');
                url.push_str(key);
                url.push('=');
                url.push_str(&urlencoding::encode(value));
            }
            url
        };

        let current = i64::from(page.page);
        let max_pages = i64::from(page.pages());
        let mut upper = current + WINDOW;
        let mut k = current - WINDOW;
        let mut pages = Vec::new();

        while k <= upper {
            if k < 1 {
                // Keep the window the same width near the start.
                upper += 1;
            } else if k > max_pages {
                break;
            } else {
                let number = k as u32;
                let is_current = k == current;
                pages.push(PageLink {
                    number,
                    url: (!is_current).then(|| url(number)),
                    current: is_current,
                });
            }
            k += 1;
        }

        Self {
            first: url(1),
            last: url(page.pages().max(1)),
            prev: page.has_prev().then(|| url(page.page - 1)),
            next: page.has_next().then(|| url(page.page + 1)),
            pages,
        }
    }
}
