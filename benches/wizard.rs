use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use localshyp::model::PackageInfo;
use localshyp::pricing::calculate_price;
use localshyp::tracking_id::RandomIds;
use localshyp::{PackageType, Wizard, WizardConfig, WizardEvent};

/// Generates complete booking sessions for benchmarking.
///
/// Each session runs details → package → summary → checkout → reset,
/// cycling through the package tiers and the express toggle.
pub struct SessionGenerator {
    sessions: u32,
    current_session: u32,
    current_step: u8,
}

impl SessionGenerator {
    const EVENTS_PER_SESSION: u8 = 5;

    pub fn new(sessions: u32) -> Self {
        Self {
            sessions,
            current_session: 0,
            current_step: 0,
        }
    }

    /// Total number of events this generator will produce
    pub fn total_events(&self) -> u64 {
        self.sessions as u64 * Self::EVENTS_PER_SESSION as u64
    }
}

impl Iterator for SessionGenerator {
    type Item = WizardEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_session >= self.sessions {
            return None;
        }

        let session = self.current_session;
        let package_type = PackageType::ALL[session as usize % PackageType::ALL.len()];
        let event = match self.current_step {
            0 => WizardEvent::SubmitAddress {
                pickup: "221B Baker Street".to_string(),
                drop: "10 Downing Street".to_string(),
                instructions: String::new(),
                is_express: session % 2 == 0,
            },
            1 => WizardEvent::SubmitPackage {
                package_type,
                weight: 1.5,
            },
            2 => WizardEvent::ConfirmSummary,
            3 => WizardEvent::CompleteCheckout {
                name: "Jane Doe".to_string(),
                phone: "9876543210".to_string(),
            },
            _ => WizardEvent::Reset,
        };

        self.current_step += 1;
        if self.current_step >= Self::EVENTS_PER_SESSION {
            self.current_step = 0;
            self.current_session += 1;
        }

        Some(event)
    }
}

fn bench_pricing(c: &mut Criterion) {
    let packages: Vec<PackageInfo> = PackageType::ALL
        .into_iter()
        .flat_map(|package_type| {
            [false, true].map(|is_express| PackageInfo {
                package_type,
                weight: 1.75,
                is_express,
            })
        })
        .collect();

    c.bench_function("calculate_price", |b| {
        b.iter(|| {
            for package in &packages {
                black_box(calculate_price(black_box(package)).unwrap());
            }
        })
    });
}

fn bench_sessions(c: &mut Criterion) {
    let mut group = c.benchmark_group("wizard_sessions");

    for sessions in [100u32, 1_000, 10_000] {
        let generator = SessionGenerator::new(sessions);
        group.throughput(Throughput::Elements(generator.total_events()));

        group.bench_with_input(BenchmarkId::from_parameter(sessions), &sessions, |b, &n| {
            b.iter(|| {
                let mut wizard =
                    Wizard::with_ids(WizardConfig::default(), Box::new(RandomIds::seeded(n as u64)));
                for event in SessionGenerator::new(n) {
                    black_box(wizard.apply(event).unwrap());
                }
                wizard
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pricing, bench_sessions);
criterion_main!(benches);
