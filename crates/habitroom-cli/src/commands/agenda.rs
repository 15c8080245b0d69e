//! `today` and `next`: the full and the time-aware agenda.

use habitroom_core::FocusLimit;

use crate::render;
use crate::session::{self, Session};

pub fn today(session: &mut Session, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let items = session.agenda().full(&session.store, session::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print!("{}", render::today(&items));
    }
    Ok(())
}

pub fn next(
    session: &mut Session,
    count: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let limit = FocusLimit::parse_or(count, session.config.focus_limit());
    let agenda = session
        .agenda()
        .focused(&session.store, session::now(), limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&agenda)?);
    } else {
        print!("{}", render::next(&agenda));
    }
    Ok(())
}
