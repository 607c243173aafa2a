pub mod analysis_prompt;
