// Link relations.
pub const REL_NEXT: &str = "next";
pub const REL_PREVIOUS: &str = "previous";
pub const REL_LAST: &str = "last";
pub const REL_FIRST: &str = "first";
pub const REL_SELF: &str = "self";
pub const REL_DETAILS: &str = "details";
pub const REL_SEARCH: &str = "search";
pub const REL_FILTER: &str = "filter";
pub const REL_SORT: &str = "sort";

// Action methods.
pub const METHOD_POST: &str = "POST";
pub const METHOD_PATCH: &str = "PATCH";
pub const METHOD_DELETE: &str = "DELETE";

/// Links or items that should not be displayed.
pub const RENDER_NONE: &str = "none";
/// Links or items that should be embedded within the current view.
pub const RENDER_TRANSCLUDE: &str = "transclude";

// Parameter types, mirroring HTML input types plus the query dimensions.
pub const TYPE_TEXT: &str = "text";
pub const TYPE_HIDDEN: &str = "hidden";
pub const TYPE_BUTTON: &str = "button";
pub const TYPE_CHECKBOX: &str = "checkbox";
pub const TYPE_COLOR: &str = "color";
pub const TYPE_DATE: &str = "date";
pub const TYPE_DATETIME: &str = "datetime";
pub const TYPE_EMAIL: &str = "email";
pub const TYPE_FILE: &str = "file";
pub const TYPE_IMAGE: &str = "image";
pub const TYPE_INTEGER: &str = "integer";
pub const TYPE_MONTH: &str = "month";
pub const TYPE_NUMBER: &str = "number";
pub const TYPE_PASSWORD: &str = "password";
pub const TYPE_RADIO: &str = "radio";
pub const TYPE_RANGE: &str = "range";
pub const TYPE_RESET: &str = "reset";
pub const TYPE_SEARCH: &str = "search";
pub const TYPE_SELECT: &str = "select";
pub const TYPE_SUBMIT: &str = "submit";
pub const TYPE_TEL: &str = "tel";
pub const TYPE_TIME: &str = "time";
pub const TYPE_URL: &str = "url";
pub const TYPE_WEEK: &str = "week";
pub const TYPE_FILTER: &str = "filter";
pub const TYPE_SORT: &str = "sort";

/// Name of the form field that carries the invoked action.
pub const NAME_ACTION: &str = "@action";
