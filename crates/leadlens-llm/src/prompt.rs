//! Fixed persona prompts and response label prefixes.
//!
//! The prompts are the clinic's Turkish persona; the model is instructed to
//! answer with exactly two labeled lines, which [`crate::parse`] scans for.
//! Changing a label here breaks parsing of live responses, so the prefixes
//! are the single source of truth for both sides.

/// Line prefix marking the diagnosed issue in a model response.
pub const ISSUE_LABEL: &str = "Sorun:";
/// Line prefix marking the proposed remedy in a model response.
pub const SOLUTION_LABEL: &str = "Çözüm:";

/// System instruction: the model acts as the clinic's hair-health expert.
pub const SYSTEM_PROMPT: &str = "Sen bir saç uzmanısın. \
Sana iletilen görseller üzerinden kişilerin saç sağlığı ile ilgili sorunlarını analiz ediyor \
ve estetik çözümler öneriyorsun. Analizlerin bilimsel ve estetik temellere dayanmalıdır. \
Çözümlerin her zaman kısa, öz ve cerrahi çözümler olmalıdır. \
Çözüm metnini kişiye hitaben yazman ve kliniğimiz bünyesindeki hizmetlere yönlendirmen gerekiyor. \
Sorun metni yazarken cümleye her zaman 'profil resminizde analiz ettiğimiz kadarıyla' \
cümlesi ile başlamalısın.";

/// Builds the user prompt with the base64 image payload embedded.
#[must_use]
pub fn user_prompt(image_base64: &str) -> String {
    format!(
        "Resim üzerindeki saç sorununu teşhis ederek estetik alanındaki çözümü önerir misin?\n\n\
         Sonuç şu formatta olmalıdır:\n\
         {ISSUE_LABEL} [Sorun açıklaması]\n\
         {SOLUTION_LABEL} [Çözüm önerisi]\n\n\
         [image/jpeg;base64] {image_base64}"
    )
}
