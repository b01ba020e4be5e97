//! The four account notification emails
//!
//! Each email is rendered as a plain-text body plus a simple HTML body with
//! the dynamic values substituted in. Values are interpolated into known
//! markup only, never into attribute or script positions.

use crate::{Email, MailerError};

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn wrap_html(heading: &str, body: &str) -> String {
    format!(
        "<html><body style=\"font-family: sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h1>{heading}</h1>{body}\
         <p style=\"color: #888; font-size: 12px;\">This is an automated message, please do not reply.</p>\
         </body></html>"
    )
}

/// Carries the 6-digit code for confirming a new account's email.
pub struct VerificationEmail;

impl VerificationEmail {
    pub fn build(from: &str, to: &str, name: &str, code: &str) -> Result<Email, MailerError> {
        let escaped = html_escape(name);
        let html = wrap_html(
            "Verify your email",
            &format!(
                "<p>Hello {escaped},</p>\
                 <p>Thank you for signing up! Enter this code to verify your email address:</p>\
                 <p style=\"font-size: 32px; letter-spacing: 6px; font-weight: bold;\">{code}</p>\
                 <p>The code expires in 24 hours. If you didn't create an account, you can ignore this email.</p>"
            ),
        );
        let text = format!(
            "Hello {name},\n\n\
             Thank you for signing up! Enter this code to verify your email address:\n\n\
             {code}\n\n\
             The code expires in 24 hours. If you didn't create an account, you can ignore this email.\n"
        );

        Email::builder()
            .from(from)
            .to(to)
            .subject("Verify your email")
            .html_body(html)
            .text_body(text)
            .build()
    }
}

/// Sent once the email address has been verified.
pub struct WelcomeEmail;

impl WelcomeEmail {
    pub fn build(from: &str, to: &str, name: &str) -> Result<Email, MailerError> {
        let escaped = html_escape(name);
        let html = wrap_html(
            "Welcome!",
            &format!(
                "<p>Hello {escaped},</p>\
                 <p>Your email address is verified and your account is ready to use.</p>"
            ),
        );
        let text = format!(
            "Hello {name},\n\n\
             Your email address is verified and your account is ready to use.\n"
        );

        Email::builder()
            .from(from)
            .to(to)
            .subject("Welcome aboard")
            .html_body(html)
            .text_body(text)
            .build()
    }
}

/// Carries the password reset link.
pub struct ResetRequestEmail;

impl ResetRequestEmail {
    pub fn build(from: &str, to: &str, name: &str, reset_url: &str) -> Result<Email, MailerError> {
        let escaped = html_escape(name);
        let html = wrap_html(
            "Reset your password",
            &format!(
                "<p>Hello {escaped},</p>\
                 <p>We received a request to reset your password. Click the link below to choose a new one:</p>\
                 <p><a href=\"{reset_url}\">Reset password</a></p>\
                 <p>The link expires in 1 hour. If you didn't request this, you can ignore this email and your password will stay unchanged.</p>"
            ),
        );
        let text = format!(
            "Hello {name},\n\n\
             We received a request to reset your password. Open the link below to choose a new one:\n\n\
             {reset_url}\n\n\
             The link expires in 1 hour. If you didn't request this, you can ignore this email and your password will stay unchanged.\n"
        );

        Email::builder()
            .from(from)
            .to(to)
            .subject("Reset your password")
            .html_body(html)
            .text_body(text)
            .build()
    }
}

/// Confirms a completed password reset.
pub struct ResetSuccessEmail;

impl ResetSuccessEmail {
    pub fn build(from: &str, to: &str, name: &str) -> Result<Email, MailerError> {
        let escaped = html_escape(name);
        let html = wrap_html(
            "Password reset successful",
            &format!(
                "<p>Hello {escaped},</p>\
                 <p>Your password was just changed. If this was you, no further action is needed.</p>\
                 <p>If you didn't change your password, please reset it again immediately.</p>"
            ),
        );
        let text = format!(
            "Hello {name},\n\n\
             Your password was just changed. If this was you, no further action is needed.\n\n\
             If you didn't change your password, please reset it again immediately.\n"
        );

        Email::builder()
            .from(from)
            .to(to)
            .subject("Password Reset Successful")
            .html_body(html)
            .text_body(text)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FROM: &str = "AuthQuest <noreply@example.com>";

    #[test]
    fn test_verification_email_contains_code() {
        let email = VerificationEmail::build(FROM, "ann@example.com", "Ann", "123456").unwrap();

        assert_eq!(email.subject, "Verify your email");
        assert!(email.html_body.as_ref().unwrap().contains("123456"));
        assert!(email.text_body.as_ref().unwrap().contains("123456"));
    }

    #[test]
    fn test_reset_email_contains_link() {
        let url = "https://app.example.com/reset-password/deadbeef";
        let email = ResetRequestEmail::build(FROM, "ann@example.com", "Ann", url).unwrap();

        assert!(email.html_body.as_ref().unwrap().contains(url));
        assert!(email.text_body.as_ref().unwrap().contains(url));
    }

    #[test]
    fn test_name_is_escaped_in_html() {
        let email =
            WelcomeEmail::build(FROM, "ann@example.com", "<script>alert(1)</script>").unwrap();

        let html = email.html_body.unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        // Plain text body keeps the name as typed
        assert!(email.text_body.unwrap().contains("<script>"));
    }

    #[test]
    fn test_success_email_subject() {
        let email = ResetSuccessEmail::build(FROM, "ann@example.com", "Ann").unwrap();
        assert_eq!(email.subject, "Password Reset Successful");
    }
}
