use habitroom_core::model::parse_id;

use super::ItemKind;
use crate::session::Session;

pub fn run(
    session: &mut Session,
    kind: ItemKind,
    id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = parse_id(id)?;
    let description = match kind {
        ItemKind::Task => session.store.remove_task(id)?.description,
        ItemKind::Habit => session.store.remove_habit(id)?.description,
    };
    println!("🗑️  {} {id} removed: {description}", kind.label());
    Ok(())
}
