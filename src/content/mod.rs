mod bank;
mod holidays;
mod prompt;
mod scenes;
mod selector;

pub use bank::{CONTENT_BANK, ContentCategory, seasonal_categories};
pub use holidays::{HOLIDAYS, HolidayRule, holiday_for};
pub use prompt::{holiday_prompt, regular_prompt};
pub use scenes::{SCENES, SceneDescriptor};
pub use selector::{Selection, SelectorState, select};
