mod table;
pub use self::table::CompanyTable;

mod view;
pub use self::view::ReportView;
