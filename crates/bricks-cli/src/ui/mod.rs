pub(crate) use self::{surface::*, terminal_ui::*};

mod surface;
mod terminal_ui;
pub(crate) mod widgets;
