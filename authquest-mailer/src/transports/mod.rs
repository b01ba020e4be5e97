mod file;
pub mod smtp;

pub use file::FileTransport;
pub use smtp::{SmtpTransport, TlsConfig};

use lettre::Message;
use lettre::message::{MultiPart, SinglePart};

use crate::{Email, MailerError};

/// Convert an [`Email`] into a lettre [`Message`], preferring a
/// multipart/alternative body when both HTML and text are present.
pub(crate) fn build_message(email: Email) -> Result<Message, MailerError> {
    let builder = Message::builder()
        .from(email.from.parse()?)
        .to(email.to.parse()?)
        .subject(email.subject);

    let message = match (email.html_body, email.text_body) {
        (Some(html), Some(text)) => builder.multipart(
            MultiPart::alternative()
                .singlepart(SinglePart::plain(text))
                .singlepart(SinglePart::html(html)),
        )?,
        (Some(html), None) => builder.singlepart(SinglePart::html(html))?,
        (None, Some(text)) => builder.body(text)?,
        (None, None) => {
            return Err(MailerError::Builder("No email body provided".to_string()));
        }
    };

    Ok(message)
}
