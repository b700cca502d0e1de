//! Parameter editor and patch state machine.
//!
//! The editor multiplexes [`NUM_CONTROLLERS`] physical controllers onto the
//! whole patch. It is organized around two static tables:
//!
//! - [`PARAMETER_DEFINITIONS`]: every editable parameter, with its range,
//!   display unit, owning page and name resources.
//! - [`PAGE_DEFINITIONS`]: every page, tagged with its [`Group`] and the
//!   [`PageKind`] that selects how input and rendering behave on it.
//!
//! The [`Editor`] context object owns the navigation state, the active patch,
//! the undo buffer and the load/save selection. Input events arrive as
//! `(controller, value)` pairs through [`Editor::handle_input`]; render ticks
//! call [`Editor::display_summary`], [`Editor::display_details`] or
//! [`Editor::render`], which write two fixed-width rows to a
//! [`TextDisplay`](crate::display::TextDisplay).
//!
//! # Groups and pages
//!
//! ```text
//!   group        pages
//!   osc          oscillator 1, oscillator 2, mixer
//!   filter       filter, envelope
//!   modulation   lfo, mod matrix
//!   play         arpeggiator, step sequencer, keyboard
//!   load/save    load/save
//! ```
//!
//! Pressing the button of the active group cycles through its pages; pressing
//! another group's button returns to the page last visited in that group.
//!
//! # Example
//!
//! ```
//! use shruti::display::TextBuffer;
//! use shruti::editor::{Editor, Group, Page};
//! use shruti::patch::PRM_FILTER_CUTOFF;
//!
//! let mut editor = Editor::default();
//! editor.toggle_group(Group::Filter);
//! assert_eq!(editor.current_page(), Page::Filter);
//!
//! // Controller 0 on the filter page edits the cutoff; values are clamped.
//! editor.handle_input(0, 300);
//! assert_eq!(editor.patch().byte(PRM_FILTER_CUTOFF as usize), 127);
//!
//! let mut lcd = TextBuffer::new();
//! editor.display_details(&mut lcd);
//! assert_eq!(lcd.row(0), "filter          ");
//! assert_eq!(lcd.row(1), "cutoff       127");
//! ```

mod controller_map;
mod cursor;
mod dispatch;
mod edit;
mod error;
mod format;
mod load_save;
mod navigation;
mod page;
mod parameter;
mod step_sequencer;

pub use controller_map::ControllerMap;
pub use cursor::CursorContext;
pub use dispatch::{DisplayMode, Editor, EditorConfig};
pub use error::EditorError;
pub use format::{note_name, pretty_print_parameter_value, ValueText};
pub use load_save::Action;
pub use navigation::Navigation;
pub use page::{Group, Page, PageDefinition, PageKind, NUM_GROUPS, NUM_PAGES, PAGE_DEFINITIONS};
pub use parameter::{ParameterDefinition, Unit, NUM_PARAMETERS, PARAMETER_DEFINITIONS};

/// Physical controllers addressed by input events.
pub const NUM_CONTROLLERS: usize = 4;

/// Width of a label on the details view.
pub const CAPTION_WIDTH: usize = 10;

/// Width of a value on the details view.
pub const VALUE_WIDTH: usize = 6;

/// Width of one column on the summary view.
pub const COLUMN_WIDTH: usize = 4;
