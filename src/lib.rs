//! Layout engine for placing fillable fields on fixed-size document pages.
//!
//! Users draw boxes on a page image to create fields, then move them, resize
//! them and adjust table column widths with the pointer. All geometry is kept
//! in canonical units of a virtual page, independent of how large the page is
//! shown. The host is responsible only for drawing and for wiring pointer and
//! keyboard events to [`engine::EditorCore`]; it reacts to the returned
//! [`engine::Action`]s and saves the [`wire`] payload.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Input routing and the [`engine::EditorCore`] facade |
//! | [`arbiter`] | Single active gesture and cancellation |
//! | [`selection`] | Drag-to-create selection boxes and pending selections |
//! | [`drag`] | Moving fields (start-anchored) |
//! | [`resize`] | Resizing fields (incremental) |
//! | [`columns`] | Table column boundary dragging |
//! | [`hit`] | Hit-testing handles, column boundaries and bodies |
//! | [`page`] | Current page cursor and visibility filter |
//! | [`store`] | Field store and geometry clamping |
//! | [`field`] | Field and table types |
//! | [`space`] | Canonical coordinate space and display scale |
//! | [`wire`] | JSON load and save formats |
//! | [`replay`] | Newline-delimited JSON input scripts |
//! | [`config`] | Layout configuration |
//! | [`consts`] | Default dimensions and limits |

pub mod arbiter;
pub mod columns;
pub mod config;
pub mod consts;
pub mod drag;
pub mod engine;
pub mod field;
pub mod hit;
pub mod page;
pub mod replay;
pub mod resize;
pub mod selection;
pub mod space;
pub mod store;
pub mod wire;
