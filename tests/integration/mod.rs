#[cfg(test)]
mod aggregation_properties_test;


#[cfg(test)]
mod fetch_lifecycle_test;
