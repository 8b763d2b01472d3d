//! mockview-report: HTML rendering of finished interviews and history.

pub mod html;

pub use html::{
    generate_history_html, generate_interview_html, html_escape, write_history_html,
    write_interview_html,
};
