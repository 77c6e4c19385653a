//! Fixed demo data. Everything is derived from the row index so repeated
//! seeding yields the same register; only dates follow the calendar.

use economy::{Service, SupplierPricing};
use fsm_security::Role;
use hse::{Equipment, Incident, RiskAssessment, Training};
use operations::domain::model::{
    Customer, Employee, InternalOrder, OrderStatus, OrderType, Product, Route, TaskType, WorkOrder,
};
use operations::domain::route_optimizer;
use time::{Date, Duration};
use uuid::Uuid;

pub struct UserFixture {
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
    pub role: Role,
}

pub struct TenantFixture {
    pub name: &'static str,
    pub tier: Role,
    /// Mail domain for generated employee addresses.
    pub mail_domain: &'static str,
    /// First site number; keeps site ids distinct between tenants.
    pub site_base: u32,
    pub users: &'static [UserFixture],
}

pub const TENANTS: [TenantFixture; 2] = [
    TenantFixture {
        name: "Biovac Norge AS",
        tier: Role::Admin,
        mail_domain: "biovac.no",
        site_base: 1000,
        users: &[
            UserFixture {
                email: "admin@biovac.no",
                password: "admin123",
                name: "Admin Bruker",
                role: Role::Admin,
            },
            UserFixture {
                email: "bruker@biovac.no",
                password: "user123",
                name: "Test Bruker",
                role: Role::User,
            },
        ],
    },
    TenantFixture {
        name: "Demo Service AS",
        tier: Role::Trial,
        mail_domain: "demoservice.no",
        site_base: 5000,
        users: &[UserFixture {
            email: "test@test.com",
            password: "test",
            name: "Test User",
            role: Role::Admin,
        }],
    },
];

const FIRST_NAMES: [&str; 10] = [
    "Ole", "Kari", "Per", "Anne", "Lars", "Ingrid", "Erik", "Marit", "Hans", "Liv",
];
const LAST_NAMES: [&str; 10] = [
    "Hansen", "Olsen", "Johansen", "Larsen", "Andersen", "Pedersen", "Nilsen", "Kristiansen",
    "Jensen", "Karlsen",
];
const CITIES: [(&str, &str); 10] = [
    ("Oslo", "0150"),
    ("Bergen", "5003"),
    ("Trondheim", "7010"),
    ("Stavanger", "4001"),
    ("Drammen", "3001"),
    ("Fredrikstad", "1601"),
    ("Kristiansand", "4601"),
    ("Sandnes", "4302"),
    ("Troms\u{f8}", "9001"),
    ("Sarpsborg", "1701"),
];
const STREETS: [&str; 10] = [
    "Storgata", "Kirkegata", "Skole", "H\u{f8}yveien", "Strand", "Havn", "Berg", "Dal",
    "\u{c5}s", "Skog",
];
const COMPANY_TYPES: [&str; 7] = [
    "AS", "Barnehage", "Skole", "Sykehjem", "Borettslag", "Bedrift", "Kontor",
];
const POSITIONS: [&str; 4] = ["Servicetekniker", "Mont\u{f8}r", "Prosjektleder", "L\u{e6}rling"];
const INTERVALS: [&str; 4] = [
    "\u{c5}rlig",
    "Halv\u{e5}rlig",
    "Kvartalsvis",
    "M\u{e5}nedlig",
];
const PRODUCT_NAMES: [&str; 7] = [
    "Filter",
    "Ventilator",
    "Varmeovn",
    "Kj\u{f8}leenhet",
    "Brannd\u{f8}r",
    "Avtrekksvifte",
    "Varmepumpe",
];
const PRODUCT_CATEGORIES: [&str; 5] = [
    "Brannsikkerhet",
    "Ventilasjon",
    "Varme",
    "Kj\u{f8}ling",
    "Sanit\u{e6}r",
];
const SEVERITIES: [&str; 3] = ["lav", "middels", "h\u{f8}y"];

fn pick<T: Copy>(items: &[T], i: usize) -> T {
    items[i % items.len()]
}

/// Spread `i` over `0..modulo` in a scrambled but stable way.
fn spread(i: usize, step: usize, modulo: usize) -> usize {
    (i * step + 7) % modulo
}

fn days_ago(today: Date, days: usize) -> String {
    let days = i64::try_from(days).unwrap_or_default();
    (today - Duration::days(days)).to_string()
}

fn days_ahead(today: Date, days: usize) -> String {
    let days = i64::try_from(days).unwrap_or_default();
    (today + Duration::days(days)).to_string()
}

fn rate(i: usize, base: u32, span: u32) -> f64 {
    let offset = u32::try_from(spread(i, 37, span as usize)).unwrap_or_default();
    f64::from(base + offset)
}

/// One decimal, from a scrambled index: `lo + (0..=span)/10`.
fn tenths(i: usize, lo: f64, span: u32) -> f64 {
    let step = u32::try_from(spread(i, 13, span as usize + 1)).unwrap_or_default();
    lo + f64::from(step) / 10.0
}

#[must_use]
pub fn employees(tenant: &TenantFixture) -> Vec<Employee> {
    (0..8)
        .map(|i| {
            let first = pick(&FIRST_NAMES, i);
            let last = pick(&LAST_NAMES, spread(i, 3, LAST_NAMES.len()));
            Employee {
                initialer: format!("{}{}", &first[..1], &last[..1]),
                navn: format!("{first} {last}"),
                epost: Some(format!(
                    "{}.{}@{}",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    tenant.mail_domain
                )),
                telefon: Some(format!("+47 4{:02} {:02} {:03}", spread(i, 17, 100), spread(i, 29, 90) + 10, spread(i, 71, 900) + 100)),
                stilling: pick(&POSITIONS, i).to_owned(),
                intern_sats: rate(i, 500, 300),
                faktura_sats: rate(i, 800, 400),
                pa_service_sats: rate(i, 600, 300),
                pa_montering_sats: rate(i, 650, 300),
                pa_timesats: rate(i, 700, 300),
                pa_kjoresats: rate(i, 400, 200),
                pa_km_sats: tenths(i, 5.0, 50),
            }
        })
        .collect()
}

#[must_use]
pub fn customers(tenant: &TenantFixture) -> Vec<Customer> {
    (0..30)
        .map(|i| {
            let (city, postnr) = pick(&CITIES, spread(i, 7, CITIES.len()));
            let street = pick(&STREETS, spread(i, 3, STREETS.len()));
            let kind = pick(&COMPANY_TYPES, i);
            let site = tenant.site_base + u32::try_from(i).unwrap_or_default() * 11;
            Customer {
                anleggsnr: site.to_string(),
                kundennr: format!("K{}", 100 + i),
                kundnavn: format!("{city} {kind}"),
                typenr: None,
                typenavn: Some(kind.to_owned()),
                kommune: city.to_owned(),
                adresse: format!("{street}vei {}", spread(i, 19, 150) + 1),
                postnr: postnr.to_owned(),
                poststed: city.to_owned(),
                service_intervall: Some(pick(&INTERVALS, i).to_owned()),
                uke: Some((spread(i, 5, 52) + 1).to_string()),
                serviceansvarlig: None,
                telefon1: Some(format!("+47 {} {:02} {:02} {:02}", 20 + spread(i, 11, 80), spread(i, 3, 90) + 10, spread(i, 7, 90) + 10, spread(i, 13, 90) + 10)),
                telefon2: (i % 2 == 0).then(|| format!("+47 4{:02} {:02} {:03}", spread(i, 23, 100), spread(i, 31, 90) + 10, spread(i, 43, 900) + 100)),
                epost: Some(format!(
                    "post@{}{}.no",
                    city.to_lowercase().replace('\u{f8}', "o"),
                    kind.to_lowercase()
                )),
                startdato: None,
                styreenhet: None,
                kommentar: None,
                kundeinfo: None,
                tjeneste_nr: Some(format!("T00{}", i % 3 + 1)),
            }
        })
        .collect()
}

#[must_use]
pub fn work_orders(customers: &[Uuid], employees: &[Uuid], today: Date) -> Vec<WorkOrder> {
    const STATUSES: [OrderStatus; 5] = [
        OrderStatus::Fullfort,
        OrderStatus::Fullfort,
        OrderStatus::Fullfort,
        OrderStatus::Planlagt,
        OrderStatus::Avbrutt,
    ];
    const TYPES: [OrderType; 3] = [OrderType::Service, OrderType::Ekstra, OrderType::Montering];

    (0..50)
        .map(|i| WorkOrder {
            customer_id: pick(customers, spread(i, 7, customers.len())),
            employee_id: pick(employees, i),
            date: days_ago(today, spread(i, 11, 91)),
            order_type: pick(&TYPES, spread(i, 5, TYPES.len())),
            status: pick(&STATUSES, i),
            description: Some("Servicearbeid".to_owned()),
            arbeidstid: tenths(i, 1.0, 70),
            kjoretid: tenths(i, 0.5, 25),
            kjorte_km: tenths(i, 10.0, 1900),
        })
        .collect()
}

#[must_use]
pub fn internal_orders(employees: &[Uuid], today: Date) -> Vec<InternalOrder> {
    const DEPARTMENTS: [&str; 4] = ["Administrasjon", "Service", "Montasje", "HMS"];
    const TASKS: [&str; 5] = [
        "Oppl\u{e6}ring og kursing",
        "M\u{f8}te med leverand\u{f8}r",
        "Administrasjonsarbeid",
        "Vedlikehold av utstyr",
        "Planlegging av prosjekter",
    ];
    const TYPES: [TaskType; 6] = [
        TaskType::Kontor,
        TaskType::Ekstra,
        TaskType::Montering,
        TaskType::Soknad,
        TaskType::Vedlikehold,
        TaskType::Diverse,
    ];

    (0..20)
        .map(|i| InternalOrder {
            avdeling: pick(&DEPARTMENTS, i).to_owned(),
            date: days_ago(today, spread(i, 13, 61)),
            employee_id: pick(employees, spread(i, 3, employees.len())),
            beskrivelse: pick(&TASKS, i).to_owned(),
            arbeidstid: tenths(i, 1.0, 70),
            task_type: pick(&TYPES, i),
            kommentar: Some("Internt arbeid".to_owned()),
        })
        .collect()
}

#[must_use]
pub fn products() -> Vec<Product> {
    const VARIANTS: [&str; 3] = ["Standard", "Premium", "Pro"];
    PRODUCT_NAMES
        .iter()
        .flat_map(|name| VARIANTS.iter().map(move |variant| (*name, *variant)))
        .enumerate()
        .map(|(i, (name, variant))| Product {
            produktnr: format!("P{}", 1000 + i),
            navn: format!("{name} {variant}"),
            beskrivelse: Some(format!(
                "H\u{f8}ykvalitets {} for profesjonell bruk",
                name.to_lowercase()
            )),
            kategori: Some(pick(&PRODUCT_CATEGORIES, spread(i, 3, PRODUCT_CATEGORIES.len())).to_owned()),
            kundepris: rate(i, 500, 14_500) + 0.5,
            pa_lager: i64::try_from(spread(i, 17, 51)).unwrap_or_default(),
            image_url: None,
        })
        .collect()
}

/// Five routes over overlapping customer subsets, already in optimized order.
#[must_use]
pub fn routes(customers: &[Customer], today: Date) -> Vec<Route> {
    (0..5)
        .map(|r| {
            let size = 3 + r;
            let requested: Vec<String> = (0..size)
                .map(|k| customers[spread(r * 5 + k, 7, customers.len())].anleggsnr.clone())
                .collect();
            Route {
                date: days_ahead(today, 1 + r * 6),
                anleggsnr_list: route_optimizer::optimize(customers, &requested),
                optimized: true,
            }
        })
        .collect()
}

#[must_use]
pub fn risk_assessments(employee_names: &[String], today: Date) -> Vec<RiskAssessment> {
    const TITLES: [&str; 5] = [
        "Arbeid i h\u{f8}yden",
        "Kjemikalieh\u{e5}ndtering",
        "Elektrisk utstyr",
        "Brannfare ved sveising",
        "Fallulykker p\u{e5} tak",
    ];
    TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| RiskAssessment {
            tittel: (*title).to_owned(),
            beskrivelse: format!("Risikovurdering for {}", title.to_lowercase()),
            dato: today.to_string(),
            alvorlighetsgrad: pick(&SEVERITIES, i).to_owned(),
            status: if i % 3 == 2 { "lukket" } else { "aktiv" }.to_owned(),
            ansvarlig: employee_names.get(i % employee_names.len().max(1)).cloned(),
        })
        .collect()
}

#[must_use]
pub fn incidents(today: Date) -> Vec<Incident> {
    const DESCRIPTIONS: [&str; 4] = [
        "Mindre kutt ved montering",
        "Nesten-ulykke med stige",
        "Farlig kjemikalie s\u{f8}lt",
        "Glemt sikkerhetsutstyr",
    ];
    const KINDS: [&str; 3] = ["ulykke", "nestenulykke", "observasjon"];
    const STATUSES: [&str; 3] = ["\u{e5}pen", "unders\u{f8}kes", "lukket"];
    DESCRIPTIONS
        .iter()
        .enumerate()
        .map(|(i, desc)| Incident {
            dato: days_ago(today, spread(i, 23, 90) + 1),
            beskrivelse: (*desc).to_owned(),
            kind: pick(&KINDS, i).to_owned(),
            status: pick(&STATUSES, i).to_owned(),
            alvorlighetsgrad: pick(&SEVERITIES, i + 1).to_owned(),
        })
        .collect()
}

#[must_use]
pub fn training(employees: &[Uuid], today: Date) -> Vec<Training> {
    vec![
        Training {
            navn: "Arbeid i h\u{f8}yden".to_owned(),
            beskrivelse: "Sertifisering for arbeid i h\u{f8}yden".to_owned(),
            dato: days_ago(today, 180),
            expires_at: Some(days_ahead(today, 545)),
            status: "aktiv".to_owned(),
            ansatte: employees.iter().take(5).copied().collect(),
        },
        Training {
            navn: "HMS-grunnkurs".to_owned(),
            beskrivelse: "Grunnleggende HMS-oppl\u{e6}ring".to_owned(),
            dato: days_ago(today, 90),
            expires_at: None,
            status: "aktiv".to_owned(),
            ansatte: employees.to_vec(),
        },
    ]
}

#[must_use]
pub fn equipment(today: Date) -> Vec<Equipment> {
    vec![
        Equipment {
            navn: "Stige 6m".to_owned(),
            control_date: days_ago(today, 30),
            next_control: days_ahead(today, 335),
            status: "ok".to_owned(),
        },
        Equipment {
            navn: "Fallsikringsutstyr".to_owned(),
            control_date: days_ago(today, 400),
            next_control: days_ago(today, 35),
            status: "trenger_kontroll".to_owned(),
        },
    ]
}

#[must_use]
pub fn services() -> Vec<Service> {
    let entry = |nr: &str, navn: &str, beskrivelse: &str, rates: [f64; 7]| {
        let [pris, t1, t2, t3, t4, t5, t6] = rates;
        Service {
            tjenestenr: nr.to_owned(),
            tjeneste_navn: navn.to_owned(),
            beskrivelse: Some(beskrivelse.to_owned()),
            leverandor: Some("Biovac AS".to_owned()),
            produsent_id: None,
            pris,
            t1_ekstraservice: t1,
            t2_ekstraservice_50: t2,
            t3_ekstraservice_100: t3,
            t4_ekstraarbeid: t4,
            t5_kjoretid: t5,
            t6_km_godtgjorelse: t6,
        }
    };
    vec![
        entry(
            "T001",
            "Serviceavtale Standard",
            "\u{c5}rlig service og vedlikehold",
            [1490.0, 850.0, 1275.0, 1700.0, 750.0, 500.0, 7.5],
        ),
        entry(
            "T002",
            "Serviceavtale Premium",
            "Halv\u{e5}rlig service og vedlikehold med prioritet",
            [2490.0, 900.0, 1350.0, 1800.0, 800.0, 550.0, 8.0],
        ),
        entry(
            "T003",
            "Akuttutrykning",
            "Akutt servicetjeneste med rask respons",
            [3500.0, 1100.0, 1650.0, 2200.0, 950.0, 650.0, 9.0],
        ),
    ]
}

#[must_use]
pub fn supplier_pricing() -> Vec<SupplierPricing> {
    vec![SupplierPricing::new("Standard", 850.0, 500.0, 7.5)]
}
