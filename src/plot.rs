use std::{ops::Range, path::Path, sync::OnceLock};

use plotters::{
    coord::Shift,
    drawing::DrawingAreaErrorKind,
    prelude::*,
    style::{FontStyle, register_font},
};

use crate::{SgdErr, dataset::Dataset, error::Result, training::LossHistory};

/// The size in pixels of the whole figure, both panels included.
pub const FIGURE_SIZE: (u32, u32) = (1200, 500);

const FONT_FAMILY: &str = "sans-serif";
const FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

type DrawResult<T, DB> =
    std::result::Result<T, DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Draws the test data next to the training loss and writes the figure to `path`.
///
/// The `.svg` extension selects the svg backend, any other path is encoded as a bitmap whose
/// format follows the extension. Both carry the panel titles and axis labels, set in the bundled
/// font. The parent directory must already exist.
///
/// # Arguments
/// * `path` - Where to write the figure.
/// * `test` - The held out data, its first two columns are the plotted coordinates.
/// * `history` - The loss of every epoch.
///
/// # Errors
/// `SgdErr::Plot` if drawing or writing the figure fails.
pub fn render(path: &Path, test: &Dataset, history: &LossHistory) -> Result<()> {
    register_fonts()?;

    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
        draw_figure(root, test, history).map_err(|e| plot_err(path, e))
    } else {
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        draw_figure(root, test, history).map_err(|e| plot_err(path, e))
    }
}

/// Makes the bundled font available to every backend, once per process.
fn register_fonts() -> Result<()> {
    static REGISTERED: OnceLock<std::result::Result<(), String>> = OnceLock::new();

    REGISTERED
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, FONT)
                .map_err(|_| "bundled font: invalid font data".to_string())
        })
        .clone()
        .map_err(SgdErr::Plot)
}

fn plot_err<E>(path: &Path, e: DrawingAreaErrorKind<E>) -> SgdErr
where
    E: std::error::Error + Send + Sync,
{
    SgdErr::Plot(format!("{}: {e}", path.display()))
}

fn draw_figure<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    test: &Dataset,
    history: &LossHistory,
) -> DrawResult<(), DB> {
    root.fill(&WHITE)?;

    let panels = root.split_evenly((1, 2));
    draw_data(&panels[0], test)?;
    draw_loss(&panels[1], history)?;

    root.present()
}

fn draw_data<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    test: &Dataset,
) -> DrawResult<(), DB> {
    let x = test.x();
    let (xs, ys) = (x.column(0), x.column(1));

    let x_range = padded_range(xs.iter().copied());
    let y_range = padded_range(ys.iter().copied());
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption("Data", (FONT_FAMILY, 24))
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_range, y_range)?;
    chart.configure_mesh().draw()?;

    let points = xs.iter().zip(ys).zip(test.y()).map(|((&a, &b), &label)| {
        let color = if label > 0.5 { RED } else { BLUE };
        Circle::new((a, b), 3, color.filled())
    });
    chart.draw_series(points)?;

    Ok(())
}

fn draw_loss<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    history: &LossHistory,
) -> DrawResult<(), DB> {
    let last_epoch = history.len().saturating_sub(1).max(1) as f32;
    let max_loss = match history.max() {
        Some(max) if max > 0.0 => max * 1.05,
        _ => 1.0,
    };

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption("Training Loss", (FONT_FAMILY, 24))
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f32..last_epoch, 0f32..max_loss)?;

    chart
        .configure_mesh()
        .x_desc("Epoch #")
        .y_desc("Loss")
        .draw()?;

    chart.draw_series(LineSeries::new(
        history.iter().enumerate().map(|(epoch, loss)| (epoch as f32, loss)),
        &RED,
    ))?;

    Ok(())
}

/// The range spanned by `values`, widened a little on both ends so no point sits on the border.
fn padded_range<I: Iterator<Item = f32>>(values: I) -> Range<f32> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }

    let pad = ((max - min) * 0.05).max(0.5);
    (min - pad)..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn test_data() -> Dataset {
        let x = array![[-1.0, -2.0, 1.0], [1.0, 2.0, 1.0], [0.5, -0.5, 1.0]];
        let y = array![0.0, 1.0, 1.0];
        Dataset::new(x, y).unwrap()
    }

    fn history(losses: &[f32]) -> LossHistory {
        let mut history = LossHistory::default();
        losses.iter().for_each(|&l| history.push(l));
        history
    }

    #[test]
    fn padded_range_contains_every_value() {
        let range = padded_range([3.0, -1.0, 2.0].into_iter());
        assert!(range.start < -1.0 && range.end > 3.0);

        let range = padded_range([2.0].into_iter());
        assert_eq!(range, 1.5..2.5);

        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
    }

    #[test]
    fn renders_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");

        render(&path, &test_data(), &history(&[3.0, 2.0, 1.5])).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn bitmaps_rasterize_the_labels() {
        register_fonts().unwrap();

        let (width, height) = (240, 60);
        let mut buf = vec![255u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            let style = TextStyle::from((FONT_FAMILY, 24).into_font());
            root.draw_text("Training Loss", &style, (5, 5)).unwrap();
            root.present().unwrap();
        }

        assert!(buf.iter().any(|&channel| channel < 128));
    }

    #[test]
    fn bitmap_figure_carries_its_captions() {
        register_fonts().unwrap();

        let (width, height) = FIGURE_SIZE;
        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, FIGURE_SIZE).into_drawing_area();
            draw_figure(root, &test_data(), &history(&[3.0, 2.0, 1.5])).unwrap();
        }

        // rows above both charts hold nothing but the captions, which are black on white
        let caption_rows = &buf[(15 * width * 3) as usize..(35 * width * 3) as usize];
        let is_black = |px: &[u8]| px.iter().all(|&channel| channel < 100);
        assert!(caption_rows.chunks(3).any(is_black));
    }

    #[test]
    fn renders_an_svg_with_an_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.svg");

        render(&path, &test_data(), &LossHistory::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("Training Loss"));
        assert!(content.contains("Epoch #"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("figure.png");

        let err = render(&path, &test_data(), &history(&[1.0])).unwrap_err();
        assert!(matches!(err, SgdErr::Plot(_)));
    }
}
