//! # Visualization
//!
//! $$
//! \text{paths }\{X^{(k)}_{t_i}\}_{k<m} \mapsto \text{one line per row}
//! $$
//!
//! Rendering is a collaborator of the generators, never a dependency: every
//! [`PathVisualizer`] takes a finished path array and the number of rows to
//! draw.
//!
use std::fs;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use ndarray::Array2;
use plotly::common::Line;
use plotly::common::Mode;
use plotly::Layout;
use plotly::Plot;
use plotly::Scatter;
use tracing::info;

use crate::traits::FloatExt;

pub trait PathVisualizer {
  /// Renders rows `0..n_rows` of `paths`, one line each.
  fn render(&self, paths: &Array2<f64>, n_rows: usize) -> Result<()>;
}

/// Lossless for `f64`, widening for `f32`.
pub fn to_f64_paths<T: FloatExt>(paths: &Array2<T>) -> Array2<f64> {
  paths.mapv(|v| v.to_f64().unwrap_or(f64::NAN))
}

fn check_rows(paths: &Array2<f64>, n_rows: usize) -> Result<()> {
  if n_rows > paths.nrows() {
    bail!(
      "asked to render {n_rows} rows but the path array has {}",
      paths.nrows()
    );
  }
  Ok(())
}

/// Builds the plotly figure shared by the plotting visualizers.
pub fn paths_plot(paths: &Array2<f64>, n_rows: usize, title: &str, line_width: f64) -> Result<Plot> {
  check_rows(paths, n_rows)?;

  let steps: Vec<usize> = (0..paths.ncols()).collect();
  let mut plot = Plot::new();
  plot.set_layout(Layout::new().title(title));

  for (i, row) in paths.outer_iter().take(n_rows).enumerate() {
    let name = format!("path {}", i + 1);
    let trace = Scatter::new(steps.clone(), row.to_vec())
      .mode(Mode::Lines)
      .line(Line::new().width(line_width))
      .name(name.as_str());
    plot.add_trace(trace);
  }

  Ok(plot)
}

/// Opens the figure in the browser through plotly.
pub struct PlotlyVisualizer {
  title: String,
  line_width: f64,
}

impl PlotlyVisualizer {
  pub fn new() -> Self {
    Self {
      title: String::new(),
      line_width: 1.0,
    }
  }

  pub fn title(mut self, title: &str) -> Self {
    self.title = title.into();
    self
  }

  pub fn line_width(mut self, w: f64) -> Self {
    self.line_width = w;
    self
  }
}

impl Default for PlotlyVisualizer {
  fn default() -> Self {
    Self::new()
  }
}

impl PathVisualizer for PlotlyVisualizer {
  fn render(&self, paths: &Array2<f64>, n_rows: usize) -> Result<()> {
    let plot = paths_plot(paths, n_rows, &self.title, self.line_width)?;
    plot.show();
    Ok(())
  }
}

/// Writes a standalone HTML file instead of opening a viewer.
pub struct HtmlFileVisualizer {
  path: PathBuf,
  title: String,
}

impl HtmlFileVisualizer {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      title: String::new(),
    }
  }

  pub fn title(mut self, title: &str) -> Self {
    self.title = title.into();
    self
  }
}

impl PathVisualizer for HtmlFileVisualizer {
  fn render(&self, paths: &Array2<f64>, n_rows: usize) -> Result<()> {
    let plot = paths_plot(paths, n_rows, &self.title, 1.0)?;
    fs::write(&self.path, plot.to_html())
      .with_context(|| format!("writing plot to {}", self.path.display()))?;
    info!(path = %self.path.display(), n_rows, "paths written");
    Ok(())
  }
}

/// Draws nothing; still validates the row count.
#[derive(Default)]
pub struct NoopVisualizer;

impl PathVisualizer for NoopVisualizer {
  fn render(&self, paths: &Array2<f64>, n_rows: usize) -> Result<()> {
    check_rows(paths, n_rows)
  }
}

#[cfg(test)]
mod tests {
  use ndarray::array;

  use super::*;
  use crate::rng::PathRng;
  use crate::stochastic::process::bridge::CorrelatedBrownianBridge;
  use crate::stochastic::process::cbms::CBMS;
  use crate::traits::ProcessExt;

  #[test]
  fn plot_has_one_trace_per_row() {
    let paths = array![[0.0, 1.0, 2.0], [0.0, -1.0, -2.0], [1.0, 1.0, 1.0]];
    let json = paths_plot(&paths, 2, "two rows", 1.0).unwrap().to_json();
    assert!(json.contains("path 1"));
    assert!(json.contains("path 2"));
    assert!(!json.contains("path 3"));
  }

  #[test]
  fn too_many_rows_is_an_error() {
    let paths = Array2::<f64>::zeros((1, 4));
    assert!(NoopVisualizer.render(&paths, 2).is_err());
    assert!(NoopVisualizer.render(&paths, 1).is_ok());
  }

  #[test]
  fn html_visualizer_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bridge.html");
    let corr = array![[1.0, 0.9], [0.9, 1.0]];
    let paths = CorrelatedBrownianBridge::bivariate(1.0, 2.0, 3.0, 1.0, &corr)
      .unwrap()
      .sample(&mut PathRng::from_seed(1))
      .unwrap();

    HtmlFileVisualizer::new(&file)
      .title("Bivariate Brownian bridge")
      .render(&paths, 2)
      .unwrap();

    let html = fs::read_to_string(&file).unwrap();
    assert!(html.contains("Bivariate Brownian bridge"));
  }

  #[test]
  fn visualizers_are_substitutable() {
    let corr = array![[1.0f32, 0.5], [0.5, 1.0]];
    let paths = CBMS::new(2, 100, 1.0 / 252.0, &corr)
      .unwrap()
      .sample(&mut PathRng::from_seed(2))
      .unwrap();
    let paths = to_f64_paths(&paths);
    let visualizers: Vec<Box<dyn PathVisualizer>> = vec![Box::new(NoopVisualizer)];
    for v in &visualizers {
      v.render(&paths, 2).unwrap();
    }
  }

  #[test]
  #[ignore = "opens a browser window"]
  fn plotly_visualizer_shows_correlated_motion() {
    let corr = array![[1.0, 0.5], [0.5, 1.0]];
    let paths = CBMS::new(2, 1000, 1.0 / 252.0, &corr)
      .unwrap()
      .sample(&mut PathRng::from_seed(3))
      .unwrap();
    PlotlyVisualizer::new()
      .title("Correlated Brownian motion")
      .render(&paths, 2)
      .unwrap();
  }
}
