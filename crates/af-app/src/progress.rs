use af_optimize::SearchProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LoadingProject,
    CheckingCache,
    LoadingCachedResult,
    Computing,
    Optimizing,
    SavingResults,
    Completed,
}

impl RunStage {
    pub fn label(self) -> &'static str {
        match self {
            Self::LoadingProject => "loading",
            Self::CheckingCache => "cache-check",
            Self::LoadingCachedResult => "cache-load",
            Self::Computing => "computing",
            Self::Optimizing => "optimizing",
            Self::SavingResults => "saving",
            Self::Completed => "done",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    /// Present while a Yagi grid search is running.
    pub search: Option<SearchProgress>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
            search: None,
        }
    }
}
