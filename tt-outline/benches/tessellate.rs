use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tt_outline::{raw::FontRef, GlyphOutliner, SvgPen, TessellatedOutline, Tessellator};
use tt_test_data::SyntheticFont;

pub fn tessellate_benchmark(c: &mut Criterion) {
    let data = SyntheticFont::simple().build();
    let font = FontRef::new(&data).unwrap();
    let outliner = GlyphOutliner::new(&font).unwrap();
    let gid = outliner.charmap().glyph_id_for('O');
    let points = outliner.glyph_points(gid).unwrap();

    for samples in [0, 8, 32] {
        let tessellator = Tessellator::new(0.064).with_curve_samples(samples);
        c.bench_with_input(
            BenchmarkId::new("tessellate_all_off_curve", samples),
            &tessellator,
            |b, tessellator| {
                let mut outline = TessellatedOutline::default();
                b.iter(|| {
                    tessellator
                        .tessellate_into(black_box(&points), &mut outline)
                        .unwrap();
                    outline.len()
                })
            },
        );
    }

    c.bench_function("outline_char", |b| {
        b.iter(|| outliner.outline_char(black_box('A'), 64.0).unwrap())
    });

    c.bench_function("draw_svg", |b| {
        let mut pen = SvgPen::new();
        b.iter(|| {
            pen.clear();
            outliner.draw_glyph(black_box(gid), 0.064, &mut pen).unwrap();
        })
    });
}

criterion_group!(benches, tessellate_benchmark);
criterion_main!(benches);
