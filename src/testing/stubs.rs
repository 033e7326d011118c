use crate::models::{Model, Task};
use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Result, bail};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Model that ignores its input and always returns `value`.
pub struct ConstantModel {
    width: usize,
    task: Task,
    value: f64,
}

impl ConstantModel {
    pub fn new(width: usize, task: Task, value: f64) -> Self {
        Self { width, task, value }
    }
}

impl Model for ConstantModel {
    fn input_width(&self) -> usize {
        self.width
    }

    fn task(&self) -> Task {
        self.task
    }

    fn predict(&self, _features: &[f64]) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Answer {
    Number(f64),
    Bool(bool),
    /// Behaves like the user pressing Esc.
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AskedField {
    pub title: String,
    pub help: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Prompt driver fed from a fixed list of answers.
pub struct ScriptedDriver {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<AskedField>>,
}

impl ScriptedDriver {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Numeric prompts shown so far.
    pub fn asked(&self) -> Vec<AskedField> {
        self.asked.borrow().clone()
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.borrow().is_empty()
    }

    fn next(&self, title: &str) -> Result<Answer> {
        match self.answers.borrow_mut().pop_front() {
            Some(Answer::Cancel) => bail!("prompt '{title}' was cancelled"),
            Some(a) => Ok(a),
            None => bail!("no scripted answer left for '{title}'"),
        }
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_bool(&self, title: &str, _help: &str, _default: bool) -> Result<bool> {
        match self.next(title)? {
            Answer::Bool(b) => Ok(b),
            other => bail!("expected a yes/no answer for '{title}', got {other:?}"),
        }
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        _default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        self.asked.borrow_mut().push(AskedField {
            title: title.to_string(),
            help: help.to_string(),
            min,
            max,
        });
        match self.next(title)? {
            Answer::Number(x) => Ok(x),
            other => bail!("expected a number for '{title}', got {other:?}"),
        }
    }
}
