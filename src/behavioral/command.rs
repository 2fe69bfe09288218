//! Command
//!
//! Editor actions (copy, cut, paste) are objects. Each one knows how to
//! run against the editor and keeps the backup it needs to be undone, so
//! the editor only has to push executed commands onto a history stack.

use crate::console::Prompt;
use crate::error::{PlaygroundError, Result};
use std::io::{BufRead, Write};
use std::ops::Range;
use std::str::FromStr;

/// Headless text area: text plus a caret and a selection, both counted in
/// characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextArea {
    text: String,
    caret: usize,
    selection: Range<usize>,
}

impl TextArea {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.chars().count();
        Self {
            text,
            caret: end,
            selection: end..end,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Replaces the whole text, collapsing caret and selection to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    pub fn set_caret(&mut self, position: usize) {
        self.caret = position.min(self.char_len());
        self.selection = self.caret..self.caret;
    }

    /// Selects `start..end`, clamped and reordered; the caret moves to `end`.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        let (start, end) = (start.min(len), end.min(len));
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.selection = start..end;
        self.caret = end;
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn selected_text(&self) -> &str {
        let range = self.byte_range(self.selection.clone());
        &self.text[range]
    }

    /// Inserts at the caret and moves the caret past the insertion.
    pub fn insert_at_caret(&mut self, fragment: &str) {
        let at = self.byte_offset(self.caret);
        self.text.insert_str(at, fragment);
        self.caret += fragment.chars().count();
        self.selection = self.caret..self.caret;
    }

    pub fn delete_selection(&mut self) {
        let start = self.selection.start;
        let range = self.byte_range(self.selection.clone());
        self.text.replace_range(range, "");
        self.caret = start;
        self.selection = start..start;
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn byte_range(&self, chars: Range<usize>) -> Range<usize> {
        self.byte_offset(chars.start)..self.byte_offset(chars.end)
    }
}

#[derive(Debug, Default)]
pub struct EditorState {
    pub text_area: TextArea,
    pub clipboard: Option<String>,
}

pub trait Command {
    fn name(&self) -> &'static str;

    /// Returns true when the editor changed and the command belongs in the
    /// history.
    fn execute(&mut self, editor: &mut EditorState) -> bool;

    fn undo(&self, editor: &mut EditorState);
}

/// Snapshot of the text taken right before a command changes it.
#[derive(Debug, Default)]
struct Backup(Option<String>);

impl Backup {
    fn take(&mut self, editor: &EditorState) {
        self.0 = Some(editor.text_area.text().to_string());
    }

    fn restore(&self, editor: &mut EditorState) {
        if let Some(text) = &self.0 {
            editor.text_area.set_text(text.clone());
        }
    }
}

/// Fills the clipboard only, so it never enters the history.
#[derive(Debug, Default)]
pub struct CopyCommand;

impl Command for CopyCommand {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn execute(&mut self, editor: &mut EditorState) -> bool {
        editor.clipboard = Some(editor.text_area.selected_text().to_string());
        false
    }

    /// The text was never touched, so there is nothing to restore.
    fn undo(&self, _editor: &mut EditorState) {}
}

#[derive(Debug, Default)]
pub struct CutCommand {
    backup: Backup,
}

impl Command for CutCommand {
    fn name(&self) -> &'static str {
        "cut"
    }

    fn execute(&mut self, editor: &mut EditorState) -> bool {
        if editor.text_area.selected_text().is_empty() {
            return false;
        }
        self.backup.take(editor);
        editor.clipboard = Some(editor.text_area.selected_text().to_string());
        editor.text_area.delete_selection();
        true
    }

    fn undo(&self, editor: &mut EditorState) {
        self.backup.restore(editor);
    }
}

#[derive(Debug, Default)]
pub struct PasteCommand {
    backup: Backup,
}

impl Command for PasteCommand {
    fn name(&self) -> &'static str {
        "paste"
    }

    fn execute(&mut self, editor: &mut EditorState) -> bool {
        let Some(clip) = editor.clipboard.clone().filter(|c| !c.is_empty()) else {
            return false;
        };
        self.backup.take(editor);
        editor.text_area.insert_at_caret(&clip);
        true
    }

    fn undo(&self, editor: &mut EditorState) {
        self.backup.restore(editor);
    }
}

#[derive(Default)]
pub struct CommandHistory {
    history: Vec<Box<dyn Command>>,
}

impl CommandHistory {
    pub fn push(&mut self, command: Box<dyn Command>) {
        self.history.push(command);
    }

    pub fn pop(&mut self) -> Option<Box<dyn Command>> {
        self.history.pop()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[derive(Default)]
pub struct Editor {
    state: EditorState,
    history: CommandHistory,
}

impl Editor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: EditorState {
                text_area: TextArea::new(text),
                clipboard: None,
            },
            history: CommandHistory::default(),
        }
    }

    pub fn text_area(&self) -> &TextArea {
        &self.state.text_area
    }

    pub fn text_area_mut(&mut self) -> &mut TextArea {
        &mut self.state.text_area
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.state.clipboard.as_deref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Runs `command`; returns whether it was recorded for undo.
    pub fn execute_command(&mut self, mut command: Box<dyn Command>) -> bool {
        let changed = command.execute(&mut self.state);
        tracing::debug!(command = command.name(), changed, "executed");
        if changed {
            self.history.push(command);
        }
        changed
    }

    pub fn copy(&mut self) -> bool {
        self.execute_command(Box::new(CopyCommand))
    }

    pub fn cut(&mut self) -> bool {
        self.execute_command(Box::new(CutCommand::default()))
    }

    pub fn paste(&mut self) -> bool {
        self.execute_command(Box::new(PasteCommand::default()))
    }

    /// Reverts the most recent recorded command, if any.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(command) => {
                command.undo(&mut self.state);
                tracing::debug!(command = command.name(), "undone");
                true
            }
            None => false,
        }
    }
}

/// One line typed at the editor prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    Type(String),
    Select(usize, usize),
    Caret(usize),
    Copy,
    Cut,
    Paste,
    Undo,
    Show,
    Quit,
}

const EDITOR_HELP: &str =
    "type <text>, select <from> <to>, caret <pos>, copy, cut, paste, undo, show or quit";

impl FromStr for EditorAction {
    type Err = PlaygroundError;

    fn from_str(line: &str) -> Result<Self> {
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let numbers: Vec<usize> = rest.split_whitespace().filter_map(|n| n.parse().ok()).collect();
        let action = match (word.to_ascii_lowercase().as_str(), numbers.as_slice()) {
            ("type", _) if !rest.is_empty() => EditorAction::Type(rest.to_string()),
            ("select", [from, to]) => EditorAction::Select(*from, *to),
            ("caret", [position]) => EditorAction::Caret(*position),
            ("copy", []) => EditorAction::Copy,
            ("cut", []) => EditorAction::Cut,
            ("paste", []) => EditorAction::Paste,
            ("undo", []) => EditorAction::Undo,
            ("show", []) => EditorAction::Show,
            ("quit", []) | ("exit", []) => EditorAction::Quit,
            _ => return Err(PlaygroundError::invalid_choice(line, EDITOR_HELP)),
        };
        Ok(action)
    }
}

fn write_status(editor: &Editor, out: &mut dyn Write) -> Result<()> {
    let area = editor.text_area();
    let selection = area.selection();
    writeln!(
        out,
        "[{}] caret {} selection {}..{} clipboard {:?}",
        area.text(),
        area.caret(),
        selection.start,
        selection.end,
        editor.clipboard().unwrap_or(""),
    )?;
    Ok(())
}

/// Line-driven stand-in for the editor window. Ends on `quit` or end of
/// input.
pub fn run_editor_session<R: BufRead, W: Write>(editor: &mut Editor, prompt: &mut Prompt<R, W>) -> Result<()> {
    writeln!(prompt.out(), "Commands: {EDITOR_HELP}")?;
    write_status(editor, prompt.out())?;
    loop {
        let line = match prompt.ask("> ") {
            Ok(line) => line,
            Err(PlaygroundError::InputClosed) => return Ok(()),
            Err(err) => return Err(err),
        };
        if line.is_empty() {
            continue;
        }
        let action = match line.parse::<EditorAction>() {
            Ok(action) => action,
            Err(err) => {
                writeln!(prompt.out(), "{err}")?;
                continue;
            }
        };

        match action {
            EditorAction::Quit => return Ok(()),
            EditorAction::Show => {}
            EditorAction::Type(text) => editor.text_area_mut().insert_at_caret(&text),
            EditorAction::Select(from, to) => editor.text_area_mut().select(from, to),
            EditorAction::Caret(position) => editor.text_area_mut().set_caret(position),
            EditorAction::Copy => {
                editor.copy();
            }
            EditorAction::Cut => {
                if !editor.cut() {
                    writeln!(prompt.out(), "Nothing selected.")?;
                }
            }
            EditorAction::Paste => {
                if !editor.paste() {
                    writeln!(prompt.out(), "Clipboard is empty.")?;
                }
            }
            EditorAction::Undo => {
                if !editor.undo() {
                    writeln!(prompt.out(), "Nothing to undo.")?;
                }
            }
        }
        write_status(editor, prompt.out())?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_fills_clipboard_without_history() {
        let mut editor = Editor::new("hello world");
        editor.text_area_mut().select(0, 5);

        assert!(!editor.copy());
        assert_eq!(editor.clipboard(), Some("hello"));
        assert_eq!(editor.history_len(), 0);
    }

    #[test]
    fn test_copy_undo_leaves_text_alone() {
        let mut state = EditorState {
            text_area: TextArea::new("hello"),
            clipboard: None,
        };
        state.text_area.select(0, 2);
        let mut copy = CopyCommand;

        assert!(!copy.execute(&mut state));
        state.text_area.set_text("changed");
        copy.undo(&mut state);

        assert_eq!(state.text_area.text(), "changed");
        assert_eq!(state.clipboard.as_deref(), Some("he"));
    }

    #[test]
    fn test_cut_then_undo_restores_text() {
        let mut editor = Editor::new("hello world");
        editor.text_area_mut().select(5, 11);

        assert!(editor.cut());
        assert_eq!(editor.text_area().text(), "hello");
        assert_eq!(editor.clipboard(), Some(" world"));

        assert!(editor.undo());
        assert_eq!(editor.text_area().text(), "hello world");
        assert!(!editor.undo());
    }

    #[test]
    fn test_cut_with_empty_selection_is_noop() {
        let mut editor = Editor::new("abc");
        assert!(!editor.cut());
        assert_eq!(editor.text_area().text(), "abc");
        assert_eq!(editor.clipboard(), None);
    }

    #[test]
    fn test_paste_inserts_at_caret() {
        let mut editor = Editor::new("ac");
        editor.text_area_mut().select(0, 1);
        editor.copy();
        editor.text_area_mut().set_caret(1);

        assert!(editor.paste());
        assert_eq!(editor.text_area().text(), "aac");
        assert_eq!(editor.text_area().caret(), 2);
    }

    #[test]
    fn test_paste_with_empty_clipboard_is_noop() {
        let mut editor = Editor::new("abc");
        assert!(!editor.paste());

        editor.text_area_mut().set_caret(1);
        editor.copy(); // empty selection -> empty clipboard
        assert!(!editor.paste());
        assert_eq!(editor.history_len(), 0);
    }

    #[test]
    fn test_undo_unwinds_in_reverse_order() {
        let mut editor = Editor::new("one two");
        editor.text_area_mut().select(3, 7);
        editor.cut();
        editor.paste();
        editor.paste();
        assert_eq!(editor.text_area().text(), "one two two");

        editor.undo();
        assert_eq!(editor.text_area().text(), "one two");
        editor.undo();
        assert_eq!(editor.text_area().text(), "one");
        editor.undo();
        assert_eq!(editor.text_area().text(), "one two");
    }

    #[test]
    fn test_selection_counts_characters_not_bytes() {
        let mut area = TextArea::new("héllo");
        area.select(1, 3);
        assert_eq!(area.selected_text(), "él");

        area.delete_selection();
        assert_eq!(area.text(), "hlo");
        assert_eq!(area.caret(), 1);
    }

    #[test]
    fn test_select_clamps_and_reorders() {
        let mut area = TextArea::new("abc");
        area.select(10, 1);
        assert_eq!(area.selection(), 1..3);
    }

    #[test]
    fn test_parse_editor_actions() {
        assert_eq!("type hello there".parse::<EditorAction>().unwrap(), EditorAction::Type("hello there".into()));
        assert_eq!("select 4 1".parse::<EditorAction>().unwrap(), EditorAction::Select(4, 1));
        assert_eq!("UNDO".parse::<EditorAction>().unwrap(), EditorAction::Undo);
        assert!("select 1".parse::<EditorAction>().is_err());
        assert!("type".parse::<EditorAction>().is_err());
        assert!("dance".parse::<EditorAction>().is_err());
    }

    #[test]
    fn test_session_cut_paste_undo() {
        let mut editor = Editor::new("");
        let script = "type hello world\nselect 5 11\ncut\ncaret 0\npaste\nundo\nbogus\nquit\ntype ignored\n";
        let mut prompt = Prompt::new(std::io::Cursor::new(script), Vec::new());

        run_editor_session(&mut editor, &mut prompt).unwrap();

        assert_eq!(editor.text_area().text(), "hello");
        assert_eq!(editor.clipboard(), Some(" world"));
        let output = String::from_utf8(prompt.into_output()).unwrap();
        assert!(output.contains("[ worldhello]"));
        assert!(output.contains("invalid choice 'bogus'"));
    }
}
