//! Charts module - static chart rendering

mod plotter;

pub use plotter::{
    mean_score_bar, render_all, score_boxplot_by_screen_time, score_density,
    study_scatter_with_fit, ChartError, PALETTE,
};
