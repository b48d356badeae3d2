use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use htmlform::config::RenderSettings;
use htmlform::domain::instance::{Instance, RecordInstance};
use htmlform::domain::schema::{FieldSpec, FieldsetGroup, RecordSchema, TabGroup, TypeDescriptor};
use htmlform::form::FormRenderer;

fn wide_record(fields: usize) -> (TypeDescriptor, Instance) {
    let group = FieldsetGroup::new("Group");
    let tab = TabGroup::new("Tab");
    let mut specs = Vec::with_capacity(fields);
    let mut value = RecordInstance::new();
    for i in 0..fields {
        let name = format!("f{}", i);
        let spec = FieldSpec::new(name.as_str(), TypeDescriptor::text());
        let spec = match i % 3 {
            0 => spec,
            1 => spec.in_fieldset(&group),
            _ => spec.in_tab(&tab),
        };
        specs.push(spec);
        value.set(name, format!("value {}", i));
    }
    (
        TypeDescriptor::record(RecordSchema::new("Wide", specs)),
        value.into(),
    )
}

fn nested_record(depth: usize) -> (TypeDescriptor, Instance) {
    let mut ty = TypeDescriptor::record(RecordSchema::new(
        "Leaf",
        vec![FieldSpec::new("x", TypeDescriptor::integer())],
    ));
    let mut value: Instance = RecordInstance::new().with("x", 1i64).into();
    for level in 0..depth {
        ty = TypeDescriptor::record(RecordSchema::new(
            format!("Level{}", level),
            vec![FieldSpec::new("child", ty)],
        ));
        value = RecordInstance::new().with("child", value).into();
    }
    (ty, value)
}

fn benchmark_wide_records(c: &mut Criterion) {
    let renderer = FormRenderer::new(RenderSettings::default()).unwrap();
    let mut group = c.benchmark_group("wide_record");
    for fields in [10, 100, 1000] {
        let (root, value) = wide_record(fields);
        group.bench_with_input(BenchmarkId::from_parameter(fields), &fields, |b, _| {
            b.iter(|| renderer.render_to_string(black_box(&root), black_box(&value)).unwrap())
        });
    }
    group.finish();
}

fn benchmark_nested_records(c: &mut Criterion) {
    let renderer = FormRenderer::new(RenderSettings::default()).unwrap();
    let (root, value) = nested_record(32);
    c.bench_function("nested_record_32", |b| {
        b.iter(|| renderer.render_to_string(black_box(&root), black_box(&value)).unwrap())
    });
}

criterion_group!(benches, benchmark_wide_records, benchmark_nested_records);
criterion_main!(benches);
