//! epistat-report: HTML and Markdown renderings of batch reports.

pub mod html;
pub mod markdown;
