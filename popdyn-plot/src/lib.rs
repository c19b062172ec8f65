use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoint};
use popdyn_models::Output;

/// Default chart title.
pub const DEFAULT_TITLE: &str = "Population Trends";

/// Default horizontal axis label.
pub const DEFAULT_X_LABEL: &str = "Time";

/// Default vertical axis label.
pub const DEFAULT_Y_LABEL: &str = "Population";

/// A runnable egui application charting population trajectories.
pub struct PlotApp {
    title: String,
    x_label: String,
    y_label: String,
    series: Vec<Series>,
}

struct Series {
    name: String,
    points: Vec<PlotPoint>,
}

impl Default for PlotApp {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            x_label: DEFAULT_X_LABEL.to_string(),
            y_label: DEFAULT_Y_LABEL.to_string(),
            series: Vec::new(),
        }
    }
}

impl PlotApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chart with one line per component of a solved simulation.
    #[must_use]
    pub fn from_output(output: &Output) -> Self {
        output
            .labels
            .iter()
            .enumerate()
            .fold(Self::new(), |app, (component, label)| {
                app.add_series(label, &output.series(component))
            })
    }

    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    #[must_use]
    pub fn with_axis_labels(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }

    #[must_use]
    pub fn add_series(mut self, name: &str, points: &[[f64; 2]]) -> Self {
        self.series.push(Series {
            name: name.to_string(),
            points: points.iter().copied().map(Into::into).collect(),
        });

        self
    }

    /// Returns the chart title, also used as the window title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the names of the plotted series in insertion order.
    pub fn series_names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|series| series.name.as_str())
    }

    /// Opens a native window and blocks until it is closed.
    #[allow(clippy::missing_errors_doc)]
    pub fn run(self) -> Result<(), eframe::Error> {
        let title = self.title.clone();
        eframe::run_native(
            &title,
            eframe::NativeOptions::default(),
            Box::new(|_cc| Ok(Box::new(self))),
        )
    }
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.title);
            Plot::new("population-plot")
                .legend(Legend::default())
                .x_axis_label(self.x_label.as_str())
                .y_axis_label(self.y_label.as_str())
                .show(ui, |plot_ui| {
                    for series in &self.series {
                        let points = series.points.as_slice();
                        let name = &series.name;

                        plot_ui.line(Line::new(points).name(name));
                    }
                });
        });
    }
}
