//! Confirmation message templates.
//!
//! Rendering is a pure function of kind, language and data. Interpolated
//! values are HTML-escaped in the HTML body and left as-is in the text body.

use wl_shared::utils::validation::escape_html;
use wl_shared::Language;

use crate::domain::value_objects::notification::{NotificationJob, NotificationKind};

/// Values interpolated into a confirmation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateData {
    pub display_name: Option<String>,
    pub confirmation_url: String,
    pub new_email: Option<String>,
    pub new_phone: Option<String>,
    pub expires_in_hours: i64,
}

/// Subject and bodies of a rendered message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl RenderedMessage {
    /// Address the rendered message to a recipient
    pub fn into_job(self, recipient: impl Into<String>, kind: NotificationKind) -> NotificationJob {
        NotificationJob {
            recipient: recipient.into(),
            subject: self.subject,
            html_body: self.html,
            text_body: self.text,
            kind,
        }
    }
}

struct Strings {
    email_subject: &'static str,
    phone_subject: &'static str,
    greeting: &'static str,
    intro: &'static str,
    email_label: &'static str,
    phone_label: &'static str,
    action: &'static str,
    button: &'static str,
    ignore: &'static str,
    signature: &'static str,
}

const ENGLISH: Strings = Strings {
    email_subject: "Confirm your new email address",
    phone_subject: "Confirm your new phone number",
    greeting: "Hello",
    intro: "We received a request to change the contact details on your WedLink profile:",
    email_label: "Email",
    phone_label: "Phone",
    action: "To confirm the change, open this link within {hours} hours:",
    button: "Confirm change",
    ignore: "If you did not request this, ignore this message and your details will stay as they are.",
    signature: "The WedLink Team",
};

const HINDI: Strings = Strings {
    email_subject: "अपने नए ईमेल पते की पुष्टि करें",
    phone_subject: "अपने नए फ़ोन नंबर की पुष्टि करें",
    greeting: "नमस्ते",
    intro: "हमें आपकी WedLink प्रोफ़ाइल के संपर्क विवरण बदलने का अनुरोध मिला है:",
    email_label: "ईमेल",
    phone_label: "फ़ोन",
    action: "बदलाव की पुष्टि के लिए {hours} घंटे के भीतर यह लिंक खोलें:",
    button: "बदलाव की पुष्टि करें",
    ignore: "यदि आपने यह अनुरोध नहीं किया है, तो इस संदेश को अनदेखा करें। आपका विवरण नहीं बदलेगा।",
    signature: "WedLink टीम",
};

fn strings(language: Language) -> &'static Strings {
    match language {
        Language::English => &ENGLISH,
        Language::Hindi => &HINDI,
    }
}

/// Render a confirmation message
pub fn render(kind: NotificationKind, language: Language, data: &TemplateData) -> RenderedMessage {
    let s = strings(language);
    let subject = match kind {
        NotificationKind::EmailChangeConfirmation => s.email_subject,
        NotificationKind::PhoneChangeConfirmation => s.phone_subject,
    };
    let action = s.action.replace("{hours}", &data.expires_in_hours.to_string());

    let mut changes: Vec<(&str, &str)> = Vec::with_capacity(2);
    if let Some(email) = data.new_email.as_deref() {
        changes.push((s.email_label, email));
    }
    if let Some(phone) = data.new_phone.as_deref() {
        changes.push((s.phone_label, phone));
    }

    let greeting = match data.display_name.as_deref() {
        Some(name) => format!("{} {},", s.greeting, name),
        None => format!("{},", s.greeting),
    };

    let text = {
        let lines: Vec<String> = changes
            .iter()
            .map(|(label, value)| format!("- {}: {}", label, value))
            .collect();
        format!(
            "{}\n\n{}\n{}\n\n{}\n{}\n\n{}\n\n{}\n",
            greeting,
            s.intro,
            lines.join("\n"),
            action,
            data.confirmation_url,
            s.ignore,
            s.signature
        )
    };

    let html = {
        let html_greeting = match data.display_name.as_deref() {
            Some(name) => format!("{} {},", s.greeting, escape_html(name)),
            None => format!("{},", s.greeting),
        };
        let items: String = changes
            .iter()
            .map(|(label, value)| format!("<li>{}: <strong>{}</strong></li>", label, escape_html(value)))
            .collect();
        let url = escape_html(&data.confirmation_url);
        format!(
            concat!(
                "<!DOCTYPE html><html lang=\"{lang}\"><body style=\"font-family:sans-serif\">",
                "<p>{greeting}</p><p>{intro}</p><ul>{items}</ul>",
                "<p>{action}</p>",
                "<p><a href=\"{url}\" style=\"background:#b5174a;color:#fff;padding:10px 18px;",
                "border-radius:4px;text-decoration:none\">{button}</a></p>",
                "<p style=\"font-size:12px;word-break:break-all\">{url}</p>",
                "<p>{ignore}</p><p>{signature}</p></body></html>"
            ),
            lang = language.code(),
            greeting = html_greeting,
            intro = s.intro,
            items = items,
            action = action,
            url = url,
            button = s.button,
            ignore = s.ignore,
            signature = s.signature,
        )
    };

    RenderedMessage {
        subject: subject.to_string(),
        html,
        text,
    }
}
