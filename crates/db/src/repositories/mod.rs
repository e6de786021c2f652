mod mission_history_repo;

pub use mission_history_repo::MissionHistoryRepo;
