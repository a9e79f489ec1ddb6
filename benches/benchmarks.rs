use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aidev::fs::LocalFs;
use aidev::generate::{prepare_variables, ProjectMetadata, TemplateApplicator};
use aidev::render::{build_context, TemplateEngine, Variables};
use aidev::template::builtin;

fn sample_metadata() -> ProjectMetadata {
    let mut metadata = ProjectMetadata::new("bench-project");
    metadata.author = Some("Benchmark User".to_string());
    metadata.features = vec!["auth".into(), "search".into(), "billing".into()];
    metadata
}

fn sample_variables() -> Variables {
    prepare_variables(&builtin::web_fullstack(), &sample_metadata())
}

fn bench_context_building(c: &mut Criterion) {
    let variables = sample_variables();

    c.bench_function("build_context", |b| {
        b.iter(|| {
            let context = build_context(black_box(&variables));
            black_box(context)
        });
    });
}

fn bench_render(c: &mut Criterion) {
    let engine = TemplateEngine::new();
    let variables = sample_variables();
    let source = "# {{ projectName | pascalCase }}\n\n{{ description }}\n\
                  {% for feature in features %}- {{ feature | capitalize }}\n{% endfor %}\
                  Created {{ createdAt | formatDate }}\n";

    c.bench_function("render", |b| {
        b.iter(|| {
            let output = engine.render(black_box(source), &variables).unwrap();
            black_box(output)
        });
    });

    let compiled = engine.compile(source).unwrap();
    c.bench_function("render_compiled", |b| {
        b.iter(|| {
            let output = compiled.render(black_box(&variables)).unwrap();
            black_box(output)
        });
    });
}

fn bench_apply(c: &mut Criterion) {
    let engine = TemplateEngine::new();
    let applicator = TemplateApplicator::new(&LocalFs, &engine);
    let template = builtin::web_fullstack();
    let metadata = sample_metadata();

    c.bench_function("apply_web_fullstack", |b| {
        b.iter(|| {
            let output = tempfile::tempdir().unwrap();
            let report = applicator
                .apply(black_box(&template), output.path(), &metadata)
                .unwrap();
            black_box(report)
        });
    });
}

criterion_group!(benches, bench_context_building, bench_render, bench_apply);
criterion_main!(benches);
