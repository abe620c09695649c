//! Entity schemas mirroring the service's JSON records.
//!
//! # Design
//! These are plain data. Every record follows the same wire rules:
//! - keys are camelCase;
//! - a field missing from a response decodes to its zero value (`0`, `""`,
//!   `false`, empty vector, `None`), and unknown fields are ignored;
//! - zero-valued fields are left out when a record is sent as a payload, so
//!   a request only carries what the caller set.
//!
//! All identifiers are `i64`. Timestamps are UTC.

mod attachment;
mod cell;
mod column;
mod discussion;
mod row;
mod sheet;
mod template;
mod user;
mod workspace;

pub use attachment::Attachment;
pub use cell::{Cell, CellHistory, CellLink, CellValue, Hyperlink, Image, ObjectValue};
pub use column::{AutoNumberFormat, Column, ContactOption};
pub use discussion::{Comment, Discussion};
pub use row::Row;
pub use sheet::{
    CrossSheetReference, ProjectSettings, Sheet, SheetSummary, SheetUserPermissions,
    SheetUserSettings, Source, SummaryField,
};
pub use template::Template;
pub use user::User;
pub use workspace::{Folder, Report, Scope, Sight, Widget, Workspace};

pub(crate) fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}
