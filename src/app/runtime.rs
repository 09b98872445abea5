use crate::core::{FormEvent, FormValues};
use crate::form::{FormContainer, SubmitOutcome};
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use std::io;
use std::time::Duration;
use tracing::debug;

const POLL_TIMEOUT: Duration = Duration::from_millis(120);

/// Drives one form on a terminal until the user leaves.
pub struct Runtime {
    form: FormContainer,
    terminal: Terminal,
    should_exit: bool,
}

impl Runtime {
    pub fn new(form: FormContainer, terminal: Terminal) -> Self {
        Self {
            form,
            terminal,
            should_exit: false,
        }
    }

    pub fn form(&self) -> &FormContainer {
        &self.form
    }

    /// Runs the event loop and returns the values of the last successful
    /// submit, if there was one.
    pub fn run(&mut self) -> io::Result<Option<FormValues>> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.render()?;
            while !self.should_exit {
                let event = self.terminal.poll_event(POLL_TIMEOUT)?;
                self.dispatch(event)?;
            }
            Ok(())
        })();

        let exit_result = self.terminal.exit();
        run_result.and(exit_result)?;

        Ok(match self.form.last_outcome() {
            Some(SubmitOutcome::Valid(values)) => Some(values.clone()),
            _ => None,
        })
    }

    fn dispatch(&mut self, event: TerminalEvent) -> io::Result<()> {
        match event {
            TerminalEvent::Key(key) => {
                let events = self.form.handle_key(key);
                self.apply(&events);
                self.render()
            }
            TerminalEvent::Resize(_) => self.render(),
            TerminalEvent::Tick => Ok(()),
        }
    }

    fn apply(&mut self, events: &[FormEvent]) {
        for event in events {
            debug!(?event, "form event");
            if *event == FormEvent::ExitRequested {
                self.should_exit = true;
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = Renderer::render(&self.form);
        self.terminal.render_frame(&frame)
    }
}
