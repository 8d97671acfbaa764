use jobscout_core::Posting;
use std::fmt::Write;

pub struct EmailTemplate {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// HTML digest listing every posting with a link to it.
pub fn render_digest(to: &str, postings: &[Posting]) -> EmailTemplate {
    let mut items = String::new();
    for posting in postings {
        // Writing to a String cannot fail.
        let _ = write!(
            items,
            "\n    <li>\n      <strong>{}</strong> at {}<br>\n      <a href=\"{}\">View Job</a>\n    </li>",
            html_escape::encode_text(&posting.title),
            html_escape::encode_text(&posting.company_name),
            html_escape::encode_double_quoted_attribute(&posting.url),
        );
    }

    EmailTemplate {
        to: to.to_string(),
        subject: format!("Job Automation: Found {} New Jobs", postings.len()),
        body: format!(
            "<h2>New Jobs Found</h2>\n<ul>{items}\n</ul>\n<p>Check your dashboard for more details.</p>\n"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_digest_lists_every_posting() {
        let postings = vec![
            Posting::new("Engineer I", "Acme", "https://acme.example/jobs/1", Utc::now()),
            Posting::new("Senior Engineer", "Globex", "https://boards.greenhouse.io/globex/jobs/77", Utc::now()),
        ];

        let email = render_digest("me@example.com", &postings);

        assert_eq!(email.to, "me@example.com");
        assert_eq!(email.subject, "Job Automation: Found 2 New Jobs");
        assert!(email.body.contains("<strong>Engineer I</strong> at Acme"));
        assert!(email.body.contains("<a href=\"https://boards.greenhouse.io/globex/jobs/77\">View Job</a>"));
        assert_eq!(email.body.matches("<li>").count(), 2);
    }

    #[test]
    fn test_digest_escapes_page_text() {
        let postings = vec![Posting::new(
            "<script>alert(1)</script> Engineer",
            "R&D \"Labs\"",
            "https://labs.example/jobs?id=1&ref=\"x\"",
            Utc::now(),
        )];

        let body = render_digest("me@example.com", &postings).body;

        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));
        assert!(body.contains("R&amp;D"));
        assert!(body.contains("id=1&amp;ref=&quot;x&quot;"));
    }
}
