//! Line-driven event loop around a `WorkoutView`.
//!
//! # Design
//! Each input line is one UI event. A plain line is the new value of the
//! text field; lines starting with `:` are commands, and `::` escapes a
//! title that itself starts with a colon. The view is redrawn
//! after every event. Request failures never leave this module: the view
//! logs and drops them.

use std::io::{self, BufRead, Write};

use workout_core::{ApiError, HttpRequest, HttpResponse, WorkoutClient, WorkoutView};

pub const HELP: &str = "\
Type a workout title to fill the input field.
  :create  create a workout from the input field
  :help    show this message
  :quit    exit
Start a line with :: to type a title that begins with a colon
  ::create types the title ':create'";

/// One user event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit(String),
    Create,
    Help,
    Quit,
}

impl Command {
    /// Interpret one input line. Only the line terminator is stripped, so
    /// leading and trailing spaces stay part of the title.
    pub fn parse(line: &str) -> Self {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        match line {
            ":create" => Command::Create,
            ":help" => Command::Help,
            ":quit" | ":q" => Command::Quit,
            text => match text.strip_prefix("::") {
                Some(rest) => Command::Edit(format!(":{rest}")),
                None => Command::Edit(text.to_string()),
            },
        }
    }
}

pub struct Session<F> {
    client: WorkoutClient,
    view: WorkoutView,
    execute: F,
}

impl<F> Session<F>
where
    F: FnMut(HttpRequest) -> Result<HttpResponse, ApiError>,
{
    pub fn new(client: WorkoutClient, execute: F) -> Self {
        Self {
            client,
            view: WorkoutView::new(),
            execute,
        }
    }

    pub fn view(&self) -> &WorkoutView {
        &self.view
    }

    /// Load the initial list. Only the first call reaches the server.
    pub fn mount(&mut self) {
        let Some(req) = self.view.mount(&self.client) else {
            return;
        };
        match (self.execute)(req) {
            Ok(response) => self.view.apply_list(&self.client, response),
            Err(err) => self.view.list_failed(err),
        }
    }

    pub fn create(&mut self) {
        let req = match self.view.create(&self.client) {
            Ok(req) => req,
            Err(err) => {
                self.view.create_failed(err);
                return;
            }
        };
        match (self.execute)(req) {
            Ok(response) => self.view.apply_create(&self.client, response),
            Err(err) => self.view.create_failed(err),
        }
    }

    /// Apply one event. Returns `false` once the session should end.
    pub fn handle(&mut self, command: Command, out: &mut impl Write) -> io::Result<bool> {
        match command {
            Command::Edit(text) => self.view.set_input(text),
            Command::Create => self.create(),
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Workouts")?;
        for row in self.view.rows() {
            writeln!(out, "- {}", row.title)?;
        }
        writeln!(out, "[{}] (:create)", self.view.input())?;
        out.flush()
    }

    /// Mount, then process lines until `:quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        self.mount();
        self.render(&mut out)?;
        for line in input.lines() {
            if !self.handle(Command::parse(&line?), &mut out)? {
                break;
            }
            self.render(&mut out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    /// A backend that answers the list call with `list` and every create
    /// call with `created`, recording what was sent.
    fn canned(
        list: HttpResponse,
        created: Result<HttpResponse, ApiError>,
        sent: &mut Vec<HttpRequest>,
    ) -> impl FnMut(HttpRequest) -> Result<HttpResponse, ApiError> + '_ {
        let mut created = Some(created);
        move |req| {
            let is_list = req.url.ends_with("/workout/all");
            sent.push(req);
            if is_list {
                Ok(list.clone())
            } else {
                created
                    .take()
                    .unwrap_or_else(|| Ok(response(500, "no more canned responses")))
            }
        }
    }

    fn run(
        session: &mut Session<impl FnMut(HttpRequest) -> Result<HttpResponse, ApiError>>,
        input: &str,
    ) -> String {
        let mut out = Vec::new();
        session.run(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse(":create\n"), Command::Create);
        assert_eq!(Command::parse(":quit\r\n"), Command::Quit);
        assert_eq!(Command::parse(":help"), Command::Help);
        assert_eq!(Command::parse("  Leg Day \n"), Command::Edit("  Leg Day ".to_string()));
        assert_eq!(Command::parse(""), Command::Edit(String::new()));
    }

    #[test]
    fn double_colon_types_a_literal_colon() {
        assert_eq!(Command::parse("::create\n"), Command::Edit(":create".to_string()));
        assert_eq!(Command::parse("::q"), Command::Edit(":q".to_string()));
        assert_eq!(Command::parse(":::"), Command::Edit("::".to_string()));
        assert_eq!(Command::parse("a::b"), Command::Edit("a::b".to_string()));
    }

    #[test]
    fn command_named_title_can_be_created() {
        let mut sent = Vec::new();
        let backend = canned(
            response(200, "[]"),
            Ok(response(201, r#"{"id":1,"title":":create"}"#)),
            &mut sent,
        );
        let mut session = Session::new(WorkoutClient::default(), backend);
        run(&mut session, "::create\n:create\n");
        assert_eq!(session.view().rows().next().unwrap().title, ":create");

        drop(session);
        let body: serde_json::Value =
            serde_json::from_str(sent[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], ":create");
    }

    #[test]
    fn mount_renders_loaded_workouts() {
        let mut sent = Vec::new();
        let backend = canned(
            response(200, r#"[{"id":1,"title":"Leg Day"}]"#),
            Ok(response(201, "{}")),
            &mut sent,
        );
        let mut session = Session::new(WorkoutClient::default(), backend);
        let output = run(&mut session, "");
        assert_eq!(output, "Workouts\n- Leg Day\n[] (:create)\n");
        drop(session);
        assert_eq!(sent.len(), 1);
    }

    #[test]
    fn typed_title_is_created_and_input_cleared() {
        let mut sent = Vec::new();
        let backend = canned(
            response(200, r#"[{"id":1,"title":"Leg Day"}]"#),
            Ok(response(201, r#"{"id":2,"title":"Push Day"}"#)),
            &mut sent,
        );
        let mut session = Session::new(WorkoutClient::default(), backend);
        let output = run(&mut session, "Push Day\n:create\n:quit\n");

        let titles: Vec<&str> = session.view().rows().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Leg Day", "Push Day"]);
        assert_eq!(session.view().input(), "");
        assert!(output.ends_with("Workouts\n- Leg Day\n- Push Day\n[] (:create)\n"));

        drop(session);
        let body: serde_json::Value =
            serde_json::from_str(sent[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Push Day");
    }

    #[test]
    fn refused_create_keeps_input() {
        let mut sent = Vec::new();
        let backend = canned(response(200, "[]"), Ok(response(503, "")), &mut sent);
        let mut session = Session::new(WorkoutClient::default(), backend);
        run(&mut session, "Push Day\n:create\n");

        assert!(session.view().workouts().is_empty());
        assert_eq!(session.view().input(), "Push Day");
    }

    #[test]
    fn transport_failure_is_swallowed() {
        let mut sent = Vec::new();
        let backend = canned(
            response(200, "[]"),
            Err(ApiError::Transport("connection reset".to_string())),
            &mut sent,
        );
        let mut session = Session::new(WorkoutClient::default(), backend);
        let output = run(&mut session, "Push Day\n:create\n");

        assert!(session.view().workouts().is_empty());
        assert!(output.ends_with("Workouts\n[Push Day] (:create)\n"));
    }

    #[test]
    fn unreachable_backend_renders_empty_list() {
        let mut session = Session::new(WorkoutClient::default(), |_req: HttpRequest| {
            Err(ApiError::Transport("connection refused".to_string()))
        });
        let output = run(&mut session, ":quit\n");
        assert_eq!(output, "Workouts\n[] (:create)\n");
    }

    #[test]
    fn help_lists_commands() {
        let mut session = Session::new(WorkoutClient::default(), |_req: HttpRequest| {
            Ok(response(200, "[]"))
        });
        let output = run(&mut session, ":help\n");
        assert!(output.contains(HELP));
    }
}
