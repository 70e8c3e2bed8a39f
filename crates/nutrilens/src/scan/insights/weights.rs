use super::super::profile::ProfileTag;
use super::definitions::InsightKey;

pub(crate) const DEFAULT_WEIGHT: u8 = 1;

/// Explicit (tag, insight) ranking weights. Unregistered pairs return `None`.
pub(crate) fn registered_weight(tag: &ProfileTag, key: InsightKey) -> Option<u8> {
    use InsightKey as I;
    use ProfileTag as T;

    let weight = match (tag, key) {
        (T::Diabetes, I::Glycemic) => 10,
        (T::Diabetes, I::Sugar) => 9,
        (T::Diabetes, I::CarbLoad) => 8,
        (T::Diabetes, I::Fiber) => 5,
        (T::Diabetes, I::Calorie) => 3,
        (T::Hypertension, I::Sodium) => 10,
        (T::HeartDisease, I::SaturatedFat) => 9,
        (T::HeartDisease, I::Sodium) => 8,
        (T::HeartDisease, I::InflammatoryFat) => 7,
        (T::HighCholesterol, I::SaturatedFat) => 10,
        (T::HighCholesterol, I::InflammatoryFat) => 7,
        (T::HighCholesterol, I::Fiber) => 6,
        (T::KidneyDisease, I::Sodium) => 10,
        (T::KidneyDisease, I::Protein) => 9,
        (T::Obesity, I::Calorie) => 10,
        (T::Obesity, I::Sugar) => 8,
        (T::Obesity, I::SaturatedFat) => 6,
        (T::Obesity, I::Glycemic) => 6,
        (T::Obesity, I::Fiber) => 4,
        (T::Pcos, I::Glycemic) => 9,
        (T::Pcos, I::Sugar) => 8,
        (T::Pcos, I::CarbLoad) => 7,
        (T::Pcos, I::InflammatoryFat) => 5,
        (T::Pcos, I::Additives) => 3,
        (T::Ibs, I::DigestiveLoad) => 10,
        (T::Ibs, I::Additives) => 6,
        (T::Ibs, I::Fiber) => 5,
        (T::GlutenIntolerance, I::DigestiveLoad) => 6,
        (T::GlutenIntolerance, I::Additives) => 4,
        (T::LactoseIntolerance, I::DigestiveLoad) => 7,
        (T::Keto, I::CarbLoad) => 10,
        (T::Keto, I::Sugar) => 8,
        (T::Keto, I::Glycemic) => 7,
        (T::LowSodium, I::Sodium) => 10,
        (T::LowSugar, I::Sugar) => 10,
        (T::LowSugar, I::Glycemic) => 6,
        _ => return None,
    };

    Some(weight)
}

/// Highest weight any active tag registers for `key`, or the default.
pub(crate) fn relevance_weight<'a, I>(tags: I, key: InsightKey) -> u8
where
    I: IntoIterator<Item = &'a ProfileTag>,
{
    tags.into_iter()
        .filter_map(|tag| registered_weight(tag, key))
        .max()
        .unwrap_or(DEFAULT_WEIGHT)
}
