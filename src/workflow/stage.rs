//! 流水线阶段

use std::fmt;

/// 流水线阶段，按执行顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    ReadRawInput,
    Clean,
    PersistCleaned,
    ReadConfig,
    ReadTemplate,
    Assemble,
    PersistPrompt,
    Invoke,
    PersistResult,
    Done,
}

impl Stage {
    /// 下一个阶段；`Done` 之后没有阶段
    pub fn next(self) -> Option<Stage> {
        use Stage::*;
        match self {
            ReadRawInput => Some(Clean),
            Clean => Some(PersistCleaned),
            PersistCleaned => Some(ReadConfig),
            ReadConfig => Some(ReadTemplate),
            ReadTemplate => Some(Assemble),
            Assemble => Some(PersistPrompt),
            PersistPrompt => Some(Invoke),
            Invoke => Some(PersistResult),
            PersistResult => Some(Done),
            Done => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::ReadRawInput => "读取原始HTML",
            Stage::Clean => "清洗HTML",
            Stage::PersistCleaned => "写入清洗结果",
            Stage::ReadConfig => "读取配置",
            Stage::ReadTemplate => "读取模板",
            Stage::Assemble => "组装提示词",
            Stage::PersistPrompt => "写入提示词",
            Stage::Invoke => "调用模型",
            Stage::PersistResult => "写入模型输出",
            Stage::Done => "完成",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
