//! Line commands understood by the interactive session.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Replace the prompt with this text and submit it.
    Generate(String),
    /// Submit the prompt as it stands.
    SubmitCurrent,
    ShowPrompt,
    ListExamples,
    UseExample(usize),
    Gallery,
    Export(usize),
    Help,
    Quit,
    Invalid(String),
}

pub const HELP: &str = "\
Type a design description and press enter to generate it.
  <empty line>   submit the current prompt
  :examples      list example prompts
  :use <n>       fill the prompt with example <n>
  :prompt        show the current prompt
  :gallery       list generated designs, newest first
  :export <n>    download design <n> from the gallery
  :help          show this help
  :quit          leave the studio";

/// Numbers shown to the user are 1-based.
pub fn parse(line: &str) -> ReplCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.trim_start().strip_prefix(':') else {
        return if line.trim().is_empty() {
            ReplCommand::SubmitCurrent
        } else {
            ReplCommand::Generate(line.to_string())
        };
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();
    match (name, arg) {
        ("examples", None) => ReplCommand::ListExamples,
        ("prompt", None) => ReplCommand::ShowPrompt,
        ("gallery", None) => ReplCommand::Gallery,
        ("help", None) => ReplCommand::Help,
        ("quit" | "q" | "exit", None) => ReplCommand::Quit,
        ("use", Some(n)) => position(n).map_or_else(
            || ReplCommand::Invalid(format!("not an example number: {n}")),
            ReplCommand::UseExample,
        ),
        ("export", Some(n)) => position(n).map_or_else(
            || ReplCommand::Invalid(format!("not a gallery number: {n}")),
            ReplCommand::Export,
        ),
        _ => ReplCommand::Invalid(format!("unknown command ':{rest}' (try :help)")),
    }
}

fn position(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok()?.checked_sub(1)
}
