use axum::http::{HeaderMap, HeaderValue};
use clap::Args;
use forge_auth::{get_session_cookie_options, session_cookie_headers};
use forge_core::{RequestSignal, FORWARDED_PROTO_HEADER};

#[derive(Args)]
pub struct CookieOptionsCommand {
    /// Protocol the request arrived with
    #[arg(long, default_value = "http")]
    pub protocol: String,

    /// Value of an x-forwarded-proto header (repeatable)
    #[arg(long)]
    pub forwarded_proto: Vec<String>,

    /// Also print the Set-Cookie header for this session token
    #[arg(long)]
    pub session_token: Option<String>,
}

impl CookieOptionsCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        println!("{}", self.render()?);
        Ok(())
    }

    fn request_signal(&self) -> anyhow::Result<RequestSignal> {
        let mut headers = HeaderMap::new();
        for value in &self.forwarded_proto {
            headers.append(FORWARDED_PROTO_HEADER, HeaderValue::from_str(value)?);
        }
        Ok(RequestSignal::new(self.protocol.clone(), headers))
    }

    fn render(&self) -> anyhow::Result<String> {
        let signal = self.request_signal()?;
        let options = get_session_cookie_options(&signal);
        let mut output = serde_json::to_string_pretty(&options)?;

        if let Some(token) = &self.session_token {
            for value in session_cookie_headers(token, &signal)?.values() {
                output.push_str("\nSet-Cookie: ");
                output.push_str(value.to_str()?);
            }
        }

        Ok(output)
    }
}
