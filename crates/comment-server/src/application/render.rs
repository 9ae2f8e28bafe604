//! HTML page rendering.
//!
//! Two pages exist: the index (comment form plus a page of entries, newest
//! first) and a single-comment page.  Every piece of user-supplied text goes
//! through `html_escape` before it is placed in the document; ids and
//! timestamps are generated server-side but are escaped too so the rule has
//! no exceptions.
//!
//! The index embeds the submission form the client handler posts from:
//!
//! ```html
//! <form id="comment-form" action="/create" method="post">
//!   <input name="name"> <textarea name="text"></textarea>
//!   <button type="submit">Send</button>
//! </form>
//! ```

use comment_core::{format_timestamp, Comment, Page, Pagination};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Path the embedded form posts to.
pub const CREATE_PATH: &str = "/create";

/// Renders the comment index.
///
/// `pagination` is the window that produced `page`; it is used to decide
/// whether "newer" and "older" navigation links are shown.
pub fn render_index(page: &Page, pagination: &Pagination) -> String {
    let mut body = String::new();

    body.push_str(&comment_form());
    body.push_str(&format!(
        "<p class=\"total\">{} comment{}</p>\n",
        page.total,
        if page.total == 1 { "" } else { "s" }
    ));

    if page.entries.is_empty() {
        body.push_str("<p class=\"empty\">No comments yet.</p>\n");
    }
    for comment in &page.entries {
        body.push_str(&entry(comment));
    }

    body.push_str(&navigation(page.total, pagination));

    document("Comments", &body)
}

/// Renders the page for a single comment.
pub fn render_comment(comment: &Comment) -> String {
    let body = format!(
        "{}<p><a href=\"/\">All comments</a></p>\n",
        entry(comment)
    );
    document(&format!("Comment by {}", comment.name), &body)
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{}</title>\n\
         </head>\n\
         <body>\n\
         <h1>{}</h1>\n\
         {}\
         </body>\n\
         </html>\n",
        encode_text(title),
        encode_text(title),
        body
    )
}

fn entry(comment: &Comment) -> String {
    let id = comment.id.to_string();
    let stamp = format_timestamp(comment.utc);
    format!(
        "<article class=\"comment\" id=\"c-{id_attr}\">\n\
         <h2><a href=\"/{id_attr}\">{name}</a></h2>\n\
         <time datetime=\"{stamp_attr}\">{stamp_text}</time>\n\
         <p>{text}</p>\n\
         </article>\n",
        id_attr = encode_double_quoted_attribute(&id),
        name = encode_text(&comment.name),
        stamp_attr = encode_double_quoted_attribute(&stamp),
        stamp_text = encode_text(&stamp),
        text = encode_text(&comment.text),
    )
}

fn comment_form() -> String {
    format!(
        "<form id=\"comment-form\" action=\"{CREATE_PATH}\" method=\"post\">\n\
         <label>Name <input name=\"name\" required></label>\n\
         <label>Comment <textarea name=\"text\" required></textarea></label>\n\
         <button type=\"submit\">Send</button>\n\
         </form>\n"
    )
}

fn navigation(total: usize, pagination: &Pagination) -> String {
    let offset = pagination.offset();
    let limit = pagination.limit();
    let mut links = Vec::new();

    if offset > 0 {
        let newer = offset.saturating_sub(limit);
        links.push(format!(
            "<a rel=\"prev\" href=\"/?offset={newer}&amp;limit={limit}\">Newer</a>"
        ));
    }
    if limit > 0 && offset.saturating_add(limit) < total {
        let older = offset + limit;
        links.push(format!(
            "<a rel=\"next\" href=\"/?offset={older}&amp;limit={limit}\">Older</a>"
        ));
    }

    if links.is_empty() {
        String::new()
    } else {
        format!("<nav>{}</nav>\n", links.join(" "))
    }
}
