//! Attachment name resolution.
//!
//! An attachment is addressed relative to the page it is used on:
//!
//! | Name                | Page        | Resolves to            |
//! |---------------------|-------------|------------------------|
//! | `pic.png`           | `Home`      | `Home` / `pic.png`     |
//! | `Other/Page/pic.png`| `Home`      | `Other/Page` / `pic.png` |
//! | `/Sub/pic.png`      | `Home`      | `Home/Sub` / `pic.png` |
//! | `../Sib/pic.png`    | `Home/Kid`  | `Home/Sib` / `pic.png` |

/// Page and file an attachment name refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    /// Page segments, outermost first. Empty for the root page.
    pub page: Vec<String>,
    /// File name within the page's attachment directory.
    pub file: String,
}

impl AttachmentRef {
    /// Resolve `name` as used on `page`.
    ///
    /// Returns `None` when the name climbs above the root page, contains
    /// `.`/`..` segments after resolution, or has an empty file part.
    #[must_use]
    pub fn resolve(name: &str, page: &str) -> Option<Self> {
        let (page_part, file) = match name.rsplit_once('/') {
            Some((page_part, file)) => (Some(page_part), file),
            None => (None, name),
        };
        if !is_plain_segment(file) {
            return None;
        }

        let page = match page_part {
            None => split_page(page),
            Some(target) => absolute_page(target, page)?,
        };
        if !page.iter().all(|segment| is_plain_segment(segment)) {
            return None;
        }

        Some(Self {
            page,
            file: file.to_owned(),
        })
    }

    /// Page name with segments joined by `/`.
    #[must_use]
    pub fn page_name(&self) -> String {
        self.page.join("/")
    }
}

/// Turn a page reference into an absolute page path.
fn absolute_page(target: &str, current: &str) -> Option<Vec<String>> {
    if let Some(sub) = target.strip_prefix('/') {
        let mut page = split_page(current);
        page.extend(split_page(sub));
        return Some(page);
    }

    if target.starts_with("../") || target == ".." {
        let mut page = split_page(current);
        let mut rest = target;
        loop {
            if let Some(stripped) = rest.strip_prefix("../") {
                rest = stripped;
            } else if rest == ".." {
                rest = "";
            } else {
                break;
            }
            // Leaving the current page moves to its parent.
            page.pop()?;
        }
        page.extend(split_page(rest));
        return Some(page);
    }

    Some(split_page(target))
}

fn split_page(page: &str) -> Vec<String> {
    page.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".." && !segment.contains('\\')
}
