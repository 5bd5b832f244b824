use crate::types::{Category, DrugRecord, Probability, SideEffect};

use super::MembershipList;

fn record(
    name: &str,
    generic_name: &str,
    description: &str,
    side_effects: &[(&str, Probability)],
) -> DrugRecord {
    DrugRecord {
        name: name.to_string(),
        generic_name: generic_name.to_string(),
        description: description.to_string(),
        side_effects: side_effects
            .iter()
            .map(|(effect, probability)| SideEffect {
                effect: effect.to_string(),
                probability: *probability,
            })
            .collect(),
    }
}

fn list(category: Category, drugs: &[&str]) -> MembershipList {
    MembershipList {
        category,
        drugs: drugs.iter().map(|d| d.to_string()).collect(),
    }
}

/// Drug records with descriptions and known side effects.
///
/// The last few entries are deliberately absent from every membership list;
/// they are classified from their descriptions.
pub fn records() -> Vec<DrugRecord> {
    use Probability::*;

    vec![
        record(
            "Aspirin",
            "acetylsalicylic acid",
            "A nonsteroidal anti-inflammatory drug (NSAID) used to reduce pain, fever, and inflammation. Also used as a blood thinner to prevent heart attacks and strokes.",
            &[
                ("Stomach upset", Common),
                ("Heartburn", Common),
                ("Stomach bleeding", Uncommon),
                ("Allergic reaction", Rare),
            ],
        ),
        record(
            "Ibuprofen",
            "ibuprofen",
            "A nonsteroidal anti-inflammatory drug (NSAID) used to relieve pain, reduce inflammation, and lower fever.",
            &[
                ("Stomach upset", Common),
                ("Heartburn", Common),
                ("Kidney problems", Uncommon),
                ("Allergic reaction", Rare),
            ],
        ),
        record(
            "Warfarin",
            "warfarin sodium",
            "An anticoagulant (blood thinner) used to prevent blood clots from forming or growing larger in blood vessels.",
            &[
                ("Easy bruising", Common),
                ("Bleeding gums", Uncommon),
                ("Severe bleeding", Rare),
            ],
        ),
        record(
            "Metformin",
            "metformin hydrochloride",
            "An oral diabetes medicine used to improve blood sugar control in adults with type 2 diabetes.",
            &[
                ("Nausea", Common),
                ("Diarrhea", Common),
                ("Abdominal discomfort", Common),
                ("Vitamin B12 deficiency", Uncommon),
                ("Lactic acidosis", Rare),
            ],
        ),
        record(
            "Lisinopril",
            "lisinopril",
            "An ACE inhibitor used to treat high blood pressure, heart failure, and to improve survival after a heart attack.",
            &[
                ("Dry cough", Common),
                ("Dizziness", Common),
                ("Headache", Common),
                ("High potassium levels", Uncommon),
                ("Angioedema", Rare),
            ],
        ),
        record(
            "Simvastatin",
            "simvastatin",
            "A statin medication used to lower cholesterol and triglycerides in the blood.",
            &[
                ("Muscle pain", Common),
                ("Liver enzyme elevation", Uncommon),
                ("Rhabdomyolysis", Rare),
            ],
        ),
        record(
            "Amiodarone",
            "amiodarone hydrochloride",
            "An antiarrhythmic medication used to treat and prevent certain types of serious, life-threatening ventricular arrhythmias.",
            &[
                ("Sun sensitivity", Common),
                ("Thyroid dysfunction", Uncommon),
                ("Lung toxicity", Rare),
            ],
        ),
        record(
            "Digoxin",
            "digoxin",
            "A cardiac glycoside used to treat heart failure and certain types of irregular heartbeats.",
            &[
                ("Nausea", Common),
                ("Blurred vision", Uncommon),
                ("Irregular heartbeat", Rare),
            ],
        ),
        record(
            "Furosemide",
            "furosemide",
            "A loop diuretic used to treat fluid retention (edema) in people with congestive heart failure, liver disease, or kidney disorders.",
            &[
                ("Frequent urination", Common),
                ("Dizziness", Common),
                ("Low potassium levels", Uncommon),
            ],
        ),
        record(
            "Bivalirudin",
            "bivalirudin",
            "Bivalirudin is a direct thrombin inhibitor used as an anticoagulant.",
            &[("Bleeding", Common), ("Back pain", Uncommon)],
        ),
        record(
            "Bupropion",
            "bupropion hydrochloride",
            "Bupropion is an antidepressant medication.",
            &[
                ("Dry mouth", Common),
                ("Insomnia", Common),
                ("Seizures", Rare),
            ],
        ),
        record(
            "Sertraline",
            "sertraline hydrochloride",
            "A selective serotonin reuptake inhibitor (SSRI) used to treat depression, panic attacks and anxiety disorders.",
            &[
                ("Nausea", Common),
                ("Insomnia", Common),
                ("Sexual dysfunction", Uncommon),
            ],
        ),
        record(
            "Tramadol",
            "tramadol hydrochloride",
            "An opioid analgesic used to treat moderate to moderately severe pain.",
            &[
                ("Dizziness", Common),
                ("Constipation", Common),
                ("Seizures", Rare),
            ],
        ),
        record(
            "Amoxicillin",
            "amoxicillin",
            "A penicillin antibiotic used to treat bacterial infections.",
            &[("Diarrhea", Common), ("Rash", Uncommon), ("Anaphylaxis", Rare)],
        ),
        record(
            "Clarithromycin",
            "clarithromycin",
            "A macrolide antibiotic used to treat respiratory and skin infections.",
            &[
                ("Altered taste", Common),
                ("Diarrhea", Common),
                ("QT prolongation", Rare),
            ],
        ),
        record(
            "Omeprazole",
            "omeprazole",
            "A proton pump inhibitor that reduces stomach acid production.",
            &[("Headache", Common), ("Abdominal pain", Uncommon)],
        ),
        record(
            "Levothyroxine",
            "levothyroxine sodium",
            "A synthetic thyroid hormone used to treat hypothyroidism.",
            &[("Palpitations", Uncommon), ("Weight loss", Uncommon)],
        ),
        record(
            "Prednisone",
            "prednisone",
            "A corticosteroid used to reduce inflammation and suppress the immune system.",
            &[
                ("Increased appetite", Common),
                ("Elevated blood sugar", Common),
                ("Mood changes", Uncommon),
            ],
        ),
        record(
            "Albuterol",
            "albuterol sulfate",
            "A bronchodilator that relaxes airway muscles to relieve asthma symptoms.",
            &[("Tremor", Common), ("Rapid heartbeat", Uncommon)],
        ),
        record(
            "Gabapentin",
            "gabapentin",
            "An anticonvulsant used to control partial seizures and relieve nerve pain.",
            &[("Drowsiness", Common), ("Dizziness", Common)],
        ),
        record(
            "Hydralazine",
            "hydralazine hydrochloride",
            "A vasodilator used to treat high blood pressure.",
            &[("Headache", Common), ("Fast heartbeat", Uncommon)],
        ),
        record(
            "Nitrofurantoin",
            "nitrofurantoin",
            "An antibacterial medicine used to treat urinary tract infections.",
            &[("Nausea", Common), ("Lung reactions", Rare)],
        ),
        record(
            "Melatonin",
            "melatonin",
            "A hormone supplement that helps regulate the sleep-wake cycle.",
            &[("Drowsiness", Common)],
        ),
        record(
            "St. John's Wort",
            "hypericum perforatum",
            "An herbal supplement sometimes taken for low mood and mild depression.",
            &[("Sun sensitivity", Uncommon)],
        ),
        record(
            "Vitamin D3",
            "cholecalciferol",
            "A dietary supplement used to maintain bone density and calcium balance.",
            &[],
        ),
    ]
}

/// Category membership lists.
///
/// Aspirin appears under both painkillers and anticoagulants; painkillers
/// precedes anticoagulants in the enumeration, so painkillers wins.
pub fn membership() -> Vec<MembershipList> {
    vec![
        list(
            Category::Cardiovascular,
            &[
                "Lisinopril",
                "Amlodipine",
                "Metoprolol",
                "Atorvastatin",
                "Simvastatin",
                "Amiodarone",
                "Digoxin",
                "Furosemide",
                "Losartan",
                "Diltiazem",
                "Hydrochlorothiazide",
                "Spironolactone",
            ],
        ),
        list(
            Category::Antibiotics,
            &[
                "Amoxicillin",
                "Azithromycin",
                "Ciprofloxacin",
                "Clarithromycin",
                "Doxycycline",
                "Metronidazole",
                "Rifampin",
                "Sulfamethoxazole",
            ],
        ),
        list(
            Category::Psychiatric,
            &[
                "Sertraline",
                "Fluoxetine",
                "Citalopram",
                "Bupropion",
                "Lithium",
                "Phenelzine",
                "Quetiapine",
                "Haloperidol",
                "Alprazolam",
                "Trazodone",
            ],
        ),
        list(
            Category::Painkillers,
            &[
                "Aspirin",
                "Ibuprofen",
                "Naproxen",
                "Acetaminophen",
                "Tramadol",
                "Oxycodone",
                "Codeine",
                "Diclofenac",
            ],
        ),
        list(
            Category::Diabetes,
            &[
                "Metformin",
                "Insulin",
                "Glipizide",
                "Sitagliptin",
                "Pioglitazone",
                "Empagliflozin",
            ],
        ),
        list(
            Category::Anticoagulants,
            &[
                "Warfarin",
                "Heparin",
                "Apixaban",
                "Rivaroxaban",
                "Clopidogrel",
                "Bivalirudin",
                "Dabigatran",
                "Aspirin",
            ],
        ),
        list(
            Category::Respiratory,
            &[
                "Albuterol",
                "Montelukast",
                "Fluticasone",
                "Theophylline",
                "Tiotropium",
            ],
        ),
        list(
            Category::Gastrointestinal,
            &[
                "Omeprazole",
                "Pantoprazole",
                "Famotidine",
                "Ondansetron",
                "Loperamide",
                "Metoclopramide",
            ],
        ),
        list(
            Category::Hormones,
            &[
                "Levothyroxine",
                "Estradiol",
                "Prednisone",
                "Testosterone",
                "Medroxyprogesterone",
            ],
        ),
        list(
            Category::Neurological,
            &[
                "Gabapentin",
                "Levetiracetam",
                "Carbamazepine",
                "Phenytoin",
                "Valproate",
                "Sumatriptan",
                "Donepezil",
            ],
        ),
    ]
}
