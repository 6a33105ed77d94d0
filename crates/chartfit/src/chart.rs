//! The end-to-end layout pipeline: margins, then geometry, then fitted labels.

use crate::config::LayoutConfig;
use crate::margins::{LayoutMargins, MarginSolver, Side, SideLabels};
use crate::model::{
    ChartInput, ChartLayout, DataPoint, LabelRole, PartitionMode, PlacedSegment, PositionedLabel,
    SortOrder, TextAnchor,
};
use crate::{LayoutOptions, Result};
use chartfit_geom::{
    PartitionSegment, Point, Rect, Shape, WeightedItem, pack, partition_grid,
    partition_triangle, size_proportional,
};
use chartfit_text::{
    CachedTextMeasurer, FitOptions, FitResult, LabelBox, LabelSpec, TextMeasurer, TextStyle,
    fit_label,
};
use serde_json::Value;

fn fmt_number(v: f64) -> String {
    if !v.is_finite() || v.abs() < 0.0005 {
        return "0".to_string();
    }
    let r = (v * 1000.0).round() / 1000.0;
    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

/// Converts data points into weighted items, assigning `order` from `sort`.
///
/// Items stay in input order; only their `order` ranks change. Ties keep input order.
pub fn weighted_items(data: &[DataPoint], sort: SortOrder) -> Result<Vec<WeightedItem>> {
    let mut items: Vec<WeightedItem> = data
        .iter()
        .enumerate()
        .map(|(idx, point)| WeightedItem::new(point.category.clone(), point.value, idx))
        .collect();
    for item in &items {
        item.validate()?;
    }

    let mut ranked: Vec<usize> = (0..items.len()).collect();
    match sort {
        SortOrder::AsGiven => return Ok(items),
        SortOrder::Ascending => {
            ranked.sort_by(|&a, &b| items[a].weight.total_cmp(&items[b].weight));
        }
        SortOrder::Descending => {
            ranked.sort_by(|&a, &b| items[b].weight.total_cmp(&items[a].weight));
        }
    }
    for (rank, idx) in ranked.into_iter().enumerate() {
        items[idx].order = rank;
    }
    Ok(items)
}

struct Placer<'a> {
    measurer: &'a dyn TextMeasurer,
    fit: FitOptions,
    labels: Vec<PositionedLabel>,
}

impl Placer<'_> {
    fn fit(&self, text: &str, style: &TextStyle, bx: LabelBox) -> FitResult {
        fit_label(self.measurer, text, style, bx, &self.fit)
    }

    /// Pushes the label unless the fitter had to hide it.
    fn push(
        &mut self,
        item_id: Option<&str>,
        role: LabelRole,
        (x, y): (f64, f64),
        anchor: TextAnchor,
        fit: FitResult,
    ) {
        if !fit.is_visible() {
            tracing::trace!(item = ?item_id, ?role, "label hidden: box too small");
            return;
        }
        self.labels.push(PositionedLabel {
            item_id: item_id.map(str::to_string),
            role,
            x,
            y,
            anchor,
            fit,
        });
    }

    /// Fits a label into `area` and centres the fitted block in it.
    fn centred_in(
        &mut self,
        item_id: &str,
        role: LabelRole,
        text: &str,
        style: &TextStyle,
        area: Rect,
    ) {
        let fit = self.fit(text, style, LabelBox::with_height(area.width, area.height));
        let y = area.y + (area.height - fit.height).max(0.0) / 2.0;
        self.push(Some(item_id), role, (area.center().x, y), TextAnchor::Middle, fit);
    }
}

/// Lays out one chart.
///
/// Invalid weights, dimensions or config are rejected; every other degenerate case (no data,
/// all-zero weights, labels that cannot fit) yields a defined, possibly empty, layout.
pub fn layout_chart(input: &ChartInput, options: &LayoutOptions) -> Result<ChartLayout> {
    let config = &options.config;
    config.validate()?;
    let items = weighted_items(&input.data, input.sort)?;

    let measurer = CachedTextMeasurer::new(options.text_measurer.as_ref());
    let solver = MarginSolver::new(&measurer, config);
    let pad = input.base_padding;

    let mut side_labels = SideLabels::default();
    if input.mode == PartitionMode::Triangle {
        let side = side_labels.get_mut(input.label_side.into());
        side.extend(
            items
                .iter()
                .filter(|item| item.weight > 0.0)
                .map(|item| LabelSpec::new(item.id.clone(), input.style.category_label.clone())),
        );
    }
    let title_box = LabelBox::new((input.canvas_width - 2.0 * pad).max(0.0));
    if let Some(title) = input.title.as_deref().filter(|t| !t.is_empty()) {
        side_labels
            .top
            .push(LabelSpec::new(title, input.style.title.clone()).with_box(title_box));
    }

    let margins =
        solver.solve_margins(input.canvas_width, input.canvas_height, &side_labels, pad)?;
    let plot = margins.inner_rect();

    let mut placer = Placer {
        measurer: &measurer,
        fit: config.fit_options(),
        labels: Vec::new(),
    };

    if let Some(title) = input.title.as_deref().filter(|t| !t.is_empty()) {
        let fit = placer.fit(title, &input.style.title, title_box);
        placer.push(
            None,
            LabelRole::Title,
            (input.canvas_width / 2.0, pad),
            TextAnchor::Middle,
            fit,
        );
    }

    let segments = match (input.mode, input.mode.shape()) {
        (PartitionMode::Triangle, _) => {
            layout_triangle(input, config, &items, &margins, plot, &mut placer)?
        }
        (_, Some(shape)) => layout_radial(input, config, shape, &items, plot, &mut placer)?,
        _ => layout_grid(input, &items, plot, &mut placer)?,
    };

    tracing::debug!(
        mode = ?input.mode,
        items = items.len(),
        segments = segments.len(),
        labels = placer.labels.len(),
        measured = measurer.len(),
        clamped_horizontal = margins.clamped_horizontal,
        clamped_vertical = margins.clamped_vertical,
        "chart laid out"
    );

    Ok(ChartLayout {
        canvas_width: input.canvas_width,
        canvas_height: input.canvas_height,
        margins,
        plot,
        segments,
        labels: placer.labels,
    })
}

/// Parses a [`ChartInput`] from JSON and lays it out.
pub fn layout_chart_json(input: &Value, options: &LayoutOptions) -> Result<ChartLayout> {
    let input: ChartInput = serde_json::from_value(input.clone())?;
    layout_chart(&input, options)
}

fn layout_triangle(
    input: &ChartInput,
    config: &LayoutConfig,
    items: &[WeightedItem],
    margins: &LayoutMargins,
    plot: Rect,
    placer: &mut Placer<'_>,
) -> Result<Vec<PlacedSegment>> {
    let segments = partition_triangle(items, plot.width, plot.height, input.orientation)?;
    let origin = Point::new(plot.center().x, plot.y);

    let side: Side = input.label_side.into();
    let label_width = margins.get(side) - input.base_padding - config.marker_allowance;
    let (label_x, anchor) = match side {
        Side::Left => (plot.x - config.marker_allowance, TextAnchor::End),
        _ => (plot.right() + config.marker_allowance, TextAnchor::Start),
    };

    for segment in segments.iter().filter(|s| s.is_rendered()) {
        let Some(band) = segment.trapezoid() else {
            continue;
        };
        let top = plot.y + band.y_top;

        let fit = placer.fit(
            &segment.item_id,
            &input.style.category_label,
            LabelBox::with_height(label_width, band.height()),
        );
        let y = top + (band.height() - fit.height).max(0.0) / 2.0;
        placer.push(
            Some(segment.item_id.as_str()),
            LabelRole::Category,
            (label_x, y),
            anchor,
            fit,
        );

        if input.show_values {
            let mid_width = (band.width_top + band.width_bottom) / 2.0;
            let area = Rect::new(origin.x - mid_width / 2.0, top, mid_width, band.height());
            placer.centred_in(
                &segment.item_id,
                LabelRole::Value,
                &fmt_number(segment.weight),
                &input.style.value_label,
                area,
            );
        }
    }

    Ok(place_all(segments, origin))
}

/// Largest axis-aligned box inside a shape of the given extent.
fn inscribed_box(shape: Shape, extent: f64) -> Rect {
    let (w, h) = match shape {
        Shape::Circle => (extent * 2f64.sqrt(), extent * 2f64.sqrt()),
        Shape::Square => (extent, extent),
        Shape::Hexagon => (extent * 3f64.sqrt(), extent),
    };
    Rect::new(-w / 2.0, -h / 2.0, w, h)
}

fn layout_radial(
    input: &ChartInput,
    config: &LayoutConfig,
    shape: Shape,
    items: &[WeightedItem],
    plot: Rect,
    placer: &mut Placer<'_>,
) -> Result<Vec<PlacedSegment>> {
    let packing = pack(items.len());
    if packing.is_empty() {
        return Ok(Vec::new());
    }
    let cells = packing.cells(plot);
    let cell_width = plot.width / packing.cols as f64;
    let cell_height = plot.height / packing.rows as f64;

    // The label strip below each shape takes at most half the cell.
    let style = &input.style.category_label;
    let line_height = placer.measurer.measure("M", style).height;
    let text_height = (line_height * placer.fit.line_limit() as f64)
        .min((cell_height / 2.0 - config.label_gap).max(0.0));
    let label_height = (text_height + config.label_gap).min(cell_height / 2.0);
    let shape_height = cell_height - label_height;
    let max_extent = match shape {
        Shape::Square => cell_width.min(shape_height),
        Shape::Circle | Shape::Hexagon => cell_width.min(shape_height) / 2.0,
    };

    let segments = size_proportional(items, shape, max_extent, config.min_visible_extent)?;
    let centres: Vec<Point> = cells
        .iter()
        .map(|cell| Point::new(cell.center().x, cell.y + shape_height / 2.0))
        .collect();

    for (segment, centre) in segments.iter().zip(&centres) {
        if !segment.is_rendered() {
            continue;
        }
        let label_area = Rect::new(
            centre.x - cell_width / 2.0,
            centre.y + shape_height / 2.0 + config.label_gap,
            cell_width,
            text_height,
        );
        let fit = placer.fit(
            &segment.item_id,
            style,
            LabelBox::with_height(label_area.width, label_area.height),
        );
        placer.push(
            Some(segment.item_id.as_str()),
            LabelRole::Category,
            (label_area.center().x, label_area.y),
            TextAnchor::Middle,
            fit,
        );

        if input.show_values {
            let inner = segment.radius().map_or(Rect::new(0.0, 0.0, 0.0, 0.0), |r| {
                inscribed_box(shape, r)
            });
            let area = Rect::new(centre.x + inner.x, centre.y + inner.y, inner.width, inner.height);
            placer.centred_in(
                &segment.item_id,
                LabelRole::Value,
                &fmt_number(segment.weight),
                &input.style.value_label,
                area,
            );
        }
    }

    Ok(segments
        .into_iter()
        .zip(centres)
        .map(|(segment, origin)| PlacedSegment { segment, origin })
        .collect())
}

fn layout_grid(
    input: &ChartInput,
    items: &[WeightedItem],
    plot: Rect,
    placer: &mut Placer<'_>,
) -> Result<Vec<PlacedSegment>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let segments = partition_grid(items, plot)?;

    for segment in segments.iter().filter(|s| s.is_rendered()) {
        let Some(cell) = segment.cell() else {
            continue;
        };
        let category_area = if input.show_values {
            Rect::new(cell.x, cell.y, cell.width, cell.height / 2.0)
        } else {
            cell
        };
        placer.centred_in(
            &segment.item_id,
            LabelRole::Category,
            &segment.item_id,
            &input.style.category_label,
            category_area,
        );
        if input.show_values {
            let value_area = Rect::new(
                cell.x,
                cell.y + cell.height / 2.0,
                cell.width,
                cell.height / 2.0,
            );
            placer.centred_in(
                &segment.item_id,
                LabelRole::Value,
                &fmt_number(segment.weight),
                &input.style.value_label,
                value_area,
            );
        }
    }

    Ok(place_all(segments, Point::new(0.0, 0.0)))
}

fn place_all(segments: Vec<PartitionSegment>, origin: Point) -> Vec<PlacedSegment> {
    segments
        .into_iter()
        .map(|segment| PlacedSegment { segment, origin })
        .collect()
}
