//! Builtin tools, grouped by area

mod activities;
mod coaching;
mod plans;
mod report;

pub use activities::{
    GetActivitiesByDateRangeTool, GetActivitiesTool, GetActivityByIdTool, GetActivityStreamsTool,
    GetRecentActivitiesTool,
};
pub use coaching::{GetCoachingContextTool, SaveCoachingNoteTool, UpdateAthleteProfileTool};
pub use plans::{
    AnalyzePlanAdherenceTool, DeleteTrainingPlanTool, GetTrainingPlanTool, ListTrainingPlansTool,
    SaveTrainingPlanTool, UpdateTrainingPlanTool,
};
pub use report::GetTrainingReportTool;
