//! HTML pages served by the web app. Anything user- or upstream-derived is
//! escaped before it is embedded.

use crate::utils::{capitalize, escape_html};

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 32rem; margin: 3rem auto; padding: 0 1rem; }}
label {{ display: block; margin-top: 1rem; }}
input {{ width: 100%; padding: .4rem; }}
button, .button {{ margin-top: 1.5rem; padding: .6rem 1.2rem; }}
.hint {{ color: #555; }}
</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
        body = body
    )
}

pub fn login_page() -> String {
    layout(
        "tempolist",
        r#"<h1>tempolist</h1>
<p>Create a Spotify playlist of recommended songs in the tempo you want.</p>
<a class="button" href="/login">Log in with Spotify</a>"#,
    )
}

pub fn form_page() -> String {
    layout(
        "tempolist - new playlist",
        r#"<h1>New playlist</h1>
<form method="post" action="/generate_playlist">
<label>Genre <input name="genre" required placeholder="dance pop"></label>
<label>Minimum tempo (BPM) <input name="min_tempo" type="number" min="0"></label>
<label>Maximum tempo (BPM) <input name="max_tempo" type="number" min="0"></label>
<label>Target tempo (BPM) <input name="target_tempo" type="number" min="0" required></label>
<label>Number of songs <input name="max_num_songs" type="number" min="1" max="100" value="20" required></label>
<button type="submit">Generate playlist</button>
</form>
<p><a href="/logout">Log out</a></p>"#,
    )
}

pub fn success_page(playlist_url: &str) -> String {
    let url = escape_html(playlist_url);
    layout(
        "tempolist - playlist created",
        &format!(
            r#"<h1>Playlist created</h1>
<p><a href="{url}">{url}</a></p>
<p><a href="/">Generate another one</a></p>"#,
            url = url
        ),
    )
}

/// Error page showing the capitalized message, the status code and the
/// optional hint.
pub fn error_page(status_code: u16, message: &str, hint: Option<&str>) -> String {
    let hint = hint
        .map(|h| format!(r#"<p class="hint">{}</p>"#, escape_html(h)))
        .unwrap_or_default();

    layout(
        "tempolist - error",
        &format!(
            r#"<h1>Error {status}</h1>
<p>{message}</p>
{hint}
<p><a href="/">Back</a></p>"#,
            status = status_code,
            message = escape_html(&capitalize(message)),
            hint = hint
        ),
    )
}
