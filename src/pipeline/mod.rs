pub mod stage1_weights;
pub mod stage2_stats;
pub mod stage3_scores;
pub mod stage4_apply;
pub mod stage5_report;
