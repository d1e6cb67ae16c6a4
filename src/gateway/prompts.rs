//! Mode definitions and the system prompt table.
//!
//! The table is built once at startup (optionally with operator overrides)
//! and shared read-only behind an `Arc` for the lifetime of the process.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::schema::PromptConfig;

const IDEA_PROMPT: &str = "你是一个简洁的思考助手。请用一句话总结用户的想法，然后给出一个下一步行动建议（仅1条）。要求：简洁、中文、实用。";

const TODO_PROMPT: &str = "你是一个任务规划助手。请根据用户的输入，输出：
1. 目标：一句话描述目标
2. TODO：列出3条待办事项，每条前面标注优先级（P1/P2/P3）
3. 第一最小动作：立即可以执行的最小步骤

要求：中文、精炼、可执行。";

const DAILY_PROMPT: &str = "你是一个日常复盘助手。请根据用户的输入，输出三段式总结：
- Progress（进展）：1-3条已完成或正在推进的事项
- Problem（问题）：1-3条遇到的困难或挑战
- Plan（计划）：1-3条下一步计划

要求：中文、精炼、每段1-3条。";

/// Category of a note; selects the system instruction sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Idea,
    Todo,
    Daily,
}

impl Mode {
    /// Every mode, in the order they are advertised to callers.
    pub const ALL: [Mode; 3] = [Mode::Idea, Mode::Todo, Mode::Daily];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Idea => "idea",
            Mode::Todo => "todo",
            Mode::Daily => "daily",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid mode: {0}. Must be one of: idea, todo, daily")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idea" => Ok(Mode::Idea),
            "todo" => Ok(Mode::Todo),
            "daily" => Ok(Mode::Daily),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Immutable mapping from mode to system instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTable {
    idea: String,
    todo: String,
    daily: String,
}

impl PromptTable {
    /// Build the table from the built-in prompts, replacing any entry the
    /// operator configured.
    pub fn from_config(config: &PromptConfig) -> Self {
        let pick = |custom: &Option<String>, builtin: &str| {
            custom.clone().unwrap_or_else(|| builtin.to_string())
        };

        Self {
            idea: pick(&config.idea, IDEA_PROMPT),
            todo: pick(&config.todo, TODO_PROMPT),
            daily: pick(&config.daily, DAILY_PROMPT),
        }
    }

    /// Instruction for a validated mode.
    pub fn get(&self, mode: Mode) -> &str {
        match mode {
            Mode::Idea => &self.idea,
            Mode::Todo => &self.todo,
            Mode::Daily => &self.daily,
        }
    }

    /// Instruction for a raw mode name, `None` when the name is unknown.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        name.parse::<Mode>().ok().map(|mode| self.get(mode))
    }
}

impl Default for PromptTable {
    fn default() -> Self {
        Self::from_config(&PromptConfig::default())
    }
}
