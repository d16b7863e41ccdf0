pub mod notice_dialog;
pub mod table_view;
