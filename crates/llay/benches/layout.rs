//! Full-frame benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use llay::{
    Color, ElementDeclaration, LayoutDirection, Llay, LlayError, MonospaceMeasure, Padding, Sizing,
    TextConfig,
};

fn card_grid(ui: &mut Llay, rows: usize, columns: usize) -> Result<(), LlayError> {
    let column = ElementDeclaration::new()
        .with_sizing(Sizing::grow())
        .with_direction(LayoutDirection::TopToBottom)
        .with_child_gap(8);
    ui.element(column, |ui| {
        for row in 0..rows {
            let decl = ElementDeclaration::new()
                .with_sizing(Sizing::grow())
                .with_child_gap(8);
            ui.element(decl, |ui| {
                for col in 0..columns {
                    let card = ElementDeclaration::new()
                        .with_sizing(Sizing::grow())
                        .with_padding(Padding::all(8))
                        .with_background(Color::WHITE)
                        .with_corner_radius(4.0);
                    ui.element(card, |ui| {
                        ui.text(&format!("Card {row}x{col} with some text"), TextConfig::default())?;
                        Ok(())
                    })?;
                }
                Ok(())
            })?;
        }
        Ok(())
    })?;
    Ok(())
}

fn layout_small(c: &mut Criterion) {
    let mut ui = Llay::default().with_measure_text(MonospaceMeasure::default());
    c.bench_function("layout_small", |b| {
        b.iter(|| {
            ui.begin_frame().unwrap();
            card_grid(&mut ui, black_box(4), black_box(4)).unwrap();
            ui.end_frame().unwrap()
        })
    });
}

fn layout_large(c: &mut Criterion) {
    let mut ui = Llay::default().with_measure_text(MonospaceMeasure::default());
    c.bench_function("layout_large", |b| {
        b.iter(|| {
            ui.begin_frame().unwrap();
            card_grid(&mut ui, black_box(40), black_box(40)).unwrap();
            ui.end_frame().unwrap()
        })
    });
}

criterion_group!(benches, layout_small, layout_large);
criterion_main!(benches);
