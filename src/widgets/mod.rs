pub mod segmented_progress_bar;
