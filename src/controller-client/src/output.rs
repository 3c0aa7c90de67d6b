use std::cell::RefCell;
use std::rc::Rc;

/// Sink for human readable status lines
pub trait Output {
    fn output(&self, line: &str);
}

/// Write lines to standard output
pub struct Stdout;

impl Output for Stdout {
    fn output(&self, line: &str) {
        println!("{}", line)
    }
}

/// Collect lines in memory. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct Lines(Rc<RefCell<Vec<String>>>);

impl Lines {
    pub fn new() -> Self {
        Lines::default()
    }
    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
    pub fn take(&self) -> Vec<String> {
        self.0.borrow_mut().drain(..).collect()
    }
}

impl Output for Lines {
    fn output(&self, line: &str) {
        self.0.borrow_mut().push(line.to_string())
    }
}
