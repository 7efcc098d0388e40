//! UI widgets

pub mod header;
pub mod category_filter;
pub mod fact_form;
pub mod fact_list;
pub mod notice;

pub use header::render_header;
pub use category_filter::render_category_filter;
pub use fact_form::render_fact_form;
pub use fact_list::{category_color, fact_lines, render_fact_list, EMPTY_MESSAGE, LOADING_MESSAGE};
pub use notice::{render_alert, render_toasts};
