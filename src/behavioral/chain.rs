//! Chain of Responsibility
//!
//! A login request travels through a chain of middleware. Each link either
//! rejects it, accepts it on the spot, or passes it to the next link. The
//! server only knows the head of the chain, so clients can assemble
//! different chains from the same links.

use crate::console::Prompt;
use crate::error::{PlaygroundError, Result};
use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

pub const ADMIN_EMAIL: &str = "admin@example.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Stop here and let the user in.
    Accept,
    /// Stop here and refuse.
    Reject,
    /// Ask the next link.
    Next,
}

/// Read-only view of the registered accounts handed to every link.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, String>,
}

impl UserDirectory {
    pub fn has_email(&self, email: &str) -> bool {
        self.users.contains_key(email)
    }

    pub fn is_valid_password(&self, email: &str, password: &str) -> bool {
        self.users.get(email).is_some_and(|stored| stored == password)
    }
}

pub trait Middleware {
    fn check(
        &mut self,
        email: &str,
        password: &str,
        users: &UserDirectory,
        out: &mut dyn Write,
    ) -> Result<Verdict>;
}

/// Links kept in order; the first non-`Next` verdict wins.
#[derive(Default)]
pub struct MiddlewareChain {
    links: Vec<Box<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new(head: impl Middleware + 'static) -> Self {
        Self {
            links: vec![Box::new(head)],
        }
    }

    pub fn link_with(mut self, next: impl Middleware + 'static) -> Self {
        self.links.push(Box::new(next));
        self
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Running off the end of the chain counts as acceptance.
    pub fn check(
        &mut self,
        email: &str,
        password: &str,
        users: &UserDirectory,
        out: &mut dyn Write,
    ) -> Result<bool> {
        for link in &mut self.links {
            match link.check(email, password, users, out)? {
                Verdict::Accept => return Ok(true),
                Verdict::Reject => return Ok(false),
                Verdict::Next => {}
            }
        }
        Ok(true)
    }
}

/// Lets through at most `limit` requests per `window`.
pub struct ThrottlingMiddleware {
    limit: u32,
    window: Duration,
    requests: u32,
    window_start: Instant,
}

impl ThrottlingMiddleware {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            requests: 0,
            window_start: Instant::now(),
        }
    }

    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }
}

impl Middleware for ThrottlingMiddleware {
    fn check(
        &mut self,
        _email: &str,
        _password: &str,
        _users: &UserDirectory,
        out: &mut dyn Write,
    ) -> Result<Verdict> {
        if self.window_start.elapsed() > self.window {
            self.requests = 0;
            self.window_start = Instant::now();
        }

        self.requests += 1;
        if self.requests > self.limit {
            writeln!(out, "Request limit exceeded!")?;
            tracing::warn!(limit = self.limit, "login throttled");
            return Err(PlaygroundError::RateLimited {
                limit: self.limit,
                window_secs: self.window.as_secs(),
            });
        }
        Ok(Verdict::Next)
    }
}

pub struct UserExistsMiddleware;

impl Middleware for UserExistsMiddleware {
    fn check(
        &mut self,
        email: &str,
        password: &str,
        users: &UserDirectory,
        out: &mut dyn Write,
    ) -> Result<Verdict> {
        if !users.has_email(email) {
            writeln!(out, "This email is not registered!")?;
            return Ok(Verdict::Reject);
        }
        if !users.is_valid_password(email, password) {
            writeln!(out, "Wrong password!")?;
            return Ok(Verdict::Reject);
        }
        Ok(Verdict::Next)
    }
}

pub struct RoleCheckMiddleware;

impl Middleware for RoleCheckMiddleware {
    fn check(
        &mut self,
        email: &str,
        _password: &str,
        _users: &UserDirectory,
        out: &mut dyn Write,
    ) -> Result<Verdict> {
        if email == ADMIN_EMAIL {
            writeln!(out, "Hello, admin!")?;
            return Ok(Verdict::Accept);
        }
        writeln!(out, "Hello, user!")?;
        Ok(Verdict::Next)
    }
}

#[derive(Default)]
pub struct Server {
    users: UserDirectory,
    middleware: Option<MiddlewareChain>,
}

impl Server {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_middleware(&mut self, chain: MiddlewareChain) {
        self.middleware = Some(chain);
    }

    pub fn register(&mut self, email: impl Into<String>, password: impl Into<String>) {
        self.users.users.insert(email.into(), password.into());
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.users.has_email(email)
    }

    pub fn is_valid_password(&self, email: &str, password: &str) -> bool {
        self.users.is_valid_password(email, password)
    }

    /// A server without middleware lets everybody in.
    pub fn log_in(&mut self, email: &str, password: &str, out: &mut dyn Write) -> Result<bool> {
        let accepted = match self.middleware.as_mut() {
            Some(chain) => chain.check(email, password, &self.users, out)?,
            None => true,
        };
        if accepted {
            writeln!(out, "Authorization have been successful!")?;
            tracing::info!(email, "login accepted");
        }
        Ok(accepted)
    }
}

/// The server wired the way the demo runs it: two accounts behind
/// throttling, existence and role checks.
pub fn demo_server(requests_per_window: u32, window: Duration) -> Server {
    let mut server = Server::new();
    server.register(ADMIN_EMAIL, "admin_pass");
    server.register("user@example.com", "user_pass");

    let chain = MiddlewareChain::new(ThrottlingMiddleware::new(requests_per_window, window))
        .link_with(UserExistsMiddleware)
        .link_with(RoleCheckMiddleware);
    server.set_middleware(chain);
    server
}

fn ask_credentials<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> Result<(String, String)> {
    let email = prompt.ask("Enter email: ")?;
    let password = prompt.ask("Input password: ")?;
    Ok((email, password))
}

/// Prompts for credentials until a login succeeds. Returns `false` when
/// input runs out first; a tripped rate limit ends the session as an error.
pub fn login_session<R: BufRead, W: Write>(server: &mut Server, prompt: &mut Prompt<R, W>) -> Result<bool> {
    loop {
        let (email, password) = match ask_credentials(prompt) {
            Ok(pair) => pair,
            Err(PlaygroundError::InputClosed) => return Ok(false),
            Err(err) => return Err(err),
        };
        if server.log_in(&email, &password, prompt.out())? {
            return Ok(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_unknown_email_is_rejected() {
        let mut server = demo_server(10, Duration::from_secs(60));
        let mut out = Vec::new();

        let ok = server.log_in("nobody@example.com", "x", &mut out).unwrap();

        assert!(!ok);
        assert_eq!(output(out), "This email is not registered!\n");
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let mut server = demo_server(10, Duration::from_secs(60));
        let mut out = Vec::new();

        assert!(!server.log_in("user@example.com", "nope", &mut out).unwrap());
        assert_eq!(output(out), "Wrong password!\n");
    }

    #[test]
    fn test_admin_short_circuits_the_chain() {
        let mut server = demo_server(10, Duration::from_secs(60));
        let mut out = Vec::new();

        assert!(server.log_in(ADMIN_EMAIL, "admin_pass", &mut out).unwrap());
        assert_eq!(
            output(out),
            "Hello, admin!\nAuthorization have been successful!\n"
        );
    }

    #[test]
    fn test_regular_user_reaches_end_of_chain() {
        let mut server = demo_server(10, Duration::from_secs(60));
        let mut out = Vec::new();

        assert!(server.log_in("user@example.com", "user_pass", &mut out).unwrap());
        assert_eq!(
            output(out),
            "Hello, user!\nAuthorization have been successful!\n"
        );
    }

    #[test]
    fn test_third_request_trips_the_limit() {
        let mut server = demo_server(2, Duration::from_secs(60));
        let mut out = Vec::new();

        assert!(!server.log_in("a@b.c", "x", &mut out).unwrap());
        assert!(!server.log_in("a@b.c", "x", &mut out).unwrap());
        let err = server.log_in("user@example.com", "user_pass", &mut out);

        assert!(matches!(
            err,
            Err(PlaygroundError::RateLimited { limit: 2, .. })
        ));
        assert!(output(out).ends_with("Request limit exceeded!\n"));
    }

    #[test]
    fn test_window_expiry_resets_the_counter() {
        let mut throttle = ThrottlingMiddleware::new(1, Duration::from_millis(5));
        let users = UserDirectory::default();
        let mut out = Vec::new();

        assert_eq!(
            throttle.check("", "", &users, &mut out).unwrap(),
            Verdict::Next
        );
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(
            throttle.check("", "", &users, &mut out).unwrap(),
            Verdict::Next
        );
    }

    #[test]
    fn test_server_without_middleware_accepts() {
        let mut server = Server::new();
        let mut out = Vec::new();
        assert!(server.log_in("anyone", "anything", &mut out).unwrap());
    }

    #[test]
    fn test_chain_order_is_preserved() {
        let chain = MiddlewareChain::new(RoleCheckMiddleware).link_with(UserExistsMiddleware);
        assert_eq!(chain.len(), 2);

        let mut server = Server::new();
        server.set_middleware(chain);
        let mut out = Vec::new();
        // Role check runs first, so an unregistered admin address still gets in.
        assert!(server.log_in(ADMIN_EMAIL, "whatever", &mut out).unwrap());
    }

    #[test]
    fn test_session_retries_until_success() {
        let mut server = demo_server(10, Duration::from_secs(60));
        let mut prompt = Prompt::new(
            std::io::Cursor::new("nobody@example.com\nx\nuser@example.com\nuser_pass\n"),
            Vec::new(),
        );

        assert!(login_session(&mut server, &mut prompt).unwrap());
        let text = output(prompt.into_output());
        assert!(text.contains("This email is not registered!"));
        assert!(text.ends_with("Authorization have been successful!\n"));
    }

    #[test]
    fn test_session_ends_quietly_at_eof() {
        let mut server = demo_server(10, Duration::from_secs(60));
        let mut prompt = Prompt::new(std::io::Cursor::new("user@example.com\n"), Vec::new());
        assert!(!login_session(&mut server, &mut prompt).unwrap());
    }

    #[test]
    fn test_session_stops_at_rate_limit() {
        let mut server = demo_server(1, Duration::from_secs(60));
        let mut prompt = Prompt::new(std::io::Cursor::new("a\nb\nc\nd\n"), Vec::new());
        assert!(matches!(
            login_session(&mut server, &mut prompt),
            Err(PlaygroundError::RateLimited { .. })
        ));
    }
}
