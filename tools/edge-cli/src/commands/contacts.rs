//! Contact listing command.

use anyhow::Result;
use edge_data::{ContactStore, InMemoryContactStore};

use super::ContactsArgs;
use crate::context::Context;

/// Run the contacts command.
pub async fn run(args: ContactsArgs, ctx: &Context) -> Result<()> {
    let store = InMemoryContactStore::with_demo_data();
    let contacts = store.get_contacts(args.query.as_deref()).await?;

    if ctx.output.is_json() {
        ctx.output.json(&contacts);
        return Ok(());
    }

    match args.query.as_deref() {
        Some(q) => ctx.output.header(&format!("Contacts matching \"{}\"", q)),
        None => ctx.output.header("Contacts"),
    }

    let widths = [20, 24, 18];
    ctx.output.table_row(&["ID", "NAME", "TWITTER"], &widths);
    for contact in &contacts {
        let name = contact.display_name().unwrap_or_else(|| "(no name)".to_string());
        let twitter = contact
            .twitter_handle()
            .map(|h| format!("@{}", h))
            .unwrap_or_default();
        ctx.output
            .table_row(&[contact.id.as_str(), name.as_str(), twitter.as_str()], &widths);
    }

    ctx.output.info("");
    ctx.output.info(&format!("{} contact(s)", contacts.len()));

    Ok(())
}
