//! HTML views for the contacts pages.

use edge_sdk::edge_data::Contact;
use edge_sdk::edge_streaming::escape_html;

use crate::sidebar::SidebarData;

/// Render the sidebar: heading, search form and contact list.
pub fn render_sidebar(data: &SidebarData) -> String {
    let items: String = data
        .contacts
        .iter()
        .map(|contact| {
            let name = match contact.display_name() {
                Some(name) => escape_html(&name),
                None => "<i>No Name</i>".to_string(),
            };
            let star = if contact.favorite { " <span>★</span>" } else { "" };
            format!(
                r#"<li><a href="/contacts/{id}">{name}{star}</a></li>"#,
                id = escape_html(&contact.id),
                name = name,
                star = star
            )
        })
        .collect();

    let list = if items.is_empty() {
        "<p><i>No contacts</i></p>".to_string()
    } else {
        format!("<ul>{}</ul>", items)
    };

    format!(
        r#"<div id="sidebar">
    <h1><a href="/">{title}</a></h1>
    <div>
        <form id="search-form" role="search" method="get" action="/">
            <input id="q" name="q" type="search" placeholder="Search" aria-label="Search contacts" value="{q}">
        </form>
        <form method="post" action="/contacts">
            <button type="submit">New</button>
        </form>
    </div>
    <nav>{list}</nav>
</div>
"#,
        title = escape_html(&data.link_title),
        q = escape_html(data.q.as_deref().unwrap_or("")),
        list = list
    )
}

/// Render the detail view of one contact.
pub fn render_contact(contact: &Contact) -> String {
    let name = match contact.display_name() {
        Some(name) => escape_html(&name),
        None => "<i>No Name</i>".to_string(),
    };

    let avatar = contact
        .avatar
        .as_deref()
        .map(|src| format!(r#"<img alt="" src="{}">"#, escape_html(src)))
        .unwrap_or_default();

    let favorite = if contact.favorite {
        r#"<button type="submit" aria-label="Remove from favorites">★</button>"#
    } else {
        r#"<button type="submit" aria-label="Add to favorites">☆</button>"#
    };

    let twitter = contact
        .twitter_handle()
        .map(|handle| {
            format!(
                r#"<p><a href="https://twitter.com/{handle}">@{handle}</a></p>"#,
                handle = escape_html(handle)
            )
        })
        .unwrap_or_default();

    let notes = contact
        .notes
        .as_deref()
        .map(|notes| format!("<p>{}</p>", escape_html(notes)))
        .unwrap_or_default();

    format!(
        r#"<div id="contact" data-section="outlet">
    <div>{avatar}</div>
    <div>
        <h1>{name} <form method="post" action="/contacts/{id}/favorite">{favorite}</form></h1>
        {twitter}
        {notes}
        <div>
            <form method="post" action="/contacts/{id}/destroy"><button type="submit">Delete</button></form>
        </div>
    </div>
</div>"#,
        avatar = avatar,
        name = name,
        id = escape_html(&contact.id),
        favorite = favorite,
        twitter = twitter,
        notes = notes
    )
}

/// Render the landing view shown when no contact is selected.
pub fn render_index() -> String {
    r#"<p id="index-page" data-section="outlet">
    Pick a contact from the list, or search by name.
</p>"#
        .to_string()
}

/// Render the view for a contact or page that does not exist.
pub fn render_not_found(path: &str) -> String {
    format!(
        r#"<div id="not-found" data-section="outlet">
    <h1>Not Found</h1>
    <p>Nothing lives at <code>{}</code>.</p>
</div>"#,
        escape_html(path)
    )
}

/// Rendered in place of the outlet when it fails.
pub fn render_outlet_fallback() -> String {
    r#"<div id="error" data-section="outlet">
    <p>Unable to load this page. Please try again.</p>
</div>"#
        .to_string()
}

/// Styles inlined into the shell.
pub const CONTACTS_STYLES: &str = r#"
* { box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; display: flex; min-height: 100vh; }
#sidebar { width: 22rem; background: #f7f7f7; border-right: 1px solid #e3e3e3; display: flex; flex-direction: column; }
#sidebar h1 { font-size: 1rem; padding: 1rem 2rem; margin: 0; border-top: 1px solid #e3e3e3; order: 1; }
#sidebar > div { display: flex; gap: 0.5rem; padding: 1rem 2rem; border-bottom: 1px solid #e3e3e3; }
#sidebar nav { flex: 1; overflow: auto; padding: 1rem 2rem; }
#sidebar ul { list-style: none; margin: 0; padding: 0; }
#sidebar nav a { display: block; padding: 0.5rem; border-radius: 8px; color: inherit; text-decoration: none; }
#sidebar nav a:hover { background: #e3e3e3; }
#detail { flex: 1; padding: 2rem 4rem; }
#contact { display: flex; gap: 2rem; }
#contact img { width: 12rem; height: 12rem; border-radius: 1.5rem; background: #c8c8c8; object-fit: cover; }
#contact h1 { display: flex; gap: 1rem; align-items: flex-start; margin: 0; }
#contact form { display: inline; }
#index-page { color: #818181; }
"#;
