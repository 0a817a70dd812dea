pub mod names;

/// Returns the `company-context.json.example` content written by `slackkit init`.
pub fn example_context() -> &'static str {
    r##"{
  "company": {
    "name": "Northwind Cloud",
    "logo": "/assets/your-logo.png",
    "description": "Cloud software platform that helps operations teams monitor infrastructure and resolve incidents faster",
    "industry": "Software Development",
    "companySize": "Medium",
    "domain": "northwindcloud.com"
  },
  "employees": [
    {
      "name": "Jordan Rivera",
      "gender": "neutral",
      "country": "United States",
      "role": "Software Engineer",
      "avatar": "/assets/faces/your-photo.jpg",
      "me": true
    },
    {
      "name": "Priya Patel",
      "gender": "female",
      "country": "India",
      "role": "Engineering Manager",
      "avatar": null
    },
    {
      "name": "James Wilson",
      "gender": "male",
      "country": "United Kingdom",
      "role": "SRE",
      "avatar": null,
      "verbose": true
    },
    {
      "name": "Hannah Wolf",
      "gender": "female",
      "country": "Germany",
      "role": "Product Manager",
      "avatar": null,
      "emoji-heavy": true
    },
    {
      "name": "Kenji Tanaka",
      "gender": "male",
      "country": "Japan",
      "role": "Backend Engineer",
      "avatar": null
    },
    {
      "name": "Nexus AI",
      "gender": "neutral",
      "country": "Global",
      "role": "AI Assistant",
      "avatar": null
    }
  ],
  "channels": {
    "starred": [
      {
        "id": "platform",
        "name": "#platform",
        "isPrivate": false,
        "description": "Platform updates and discussions",
        "topics": ["updates", "discussions", "coordination", "announcements"]
      }
    ],
    "public": [
      {
        "id": "general",
        "name": "#general",
        "description": "Company-wide announcements and discussions",
        "topics": ["announcements", "company updates", "all-hands", "team news"]
      },
      {
        "id": "engineering",
        "name": "#engineering",
        "description": "Engineering discussions",
        "topics": ["code reviews", "architecture", "technical discussions", "PRs"]
      },
      {
        "id": "dev-ops",
        "name": "#dev-ops",
        "description": "DevOps and infrastructure",
        "topics": ["deployments", "infrastructure", "CI/CD", "scaling"]
      },
      {
        "id": "incidents",
        "name": "#incidents",
        "description": "Incident coordination",
        "topics": ["incident response", "root cause analysis", "mitigation", "alerts"]
      }
    ],
    "private": [
      {
        "id": "leadership",
        "name": "#leadership",
        "description": "Leadership team discussions",
        "topics": ["strategy", "planning", "decisions"]
      }
    ]
  },
  "communicationStyle": {
    "tone": "Professional yet collaborative",
    "formality": "Casual to semi-formal depending on context",
    "commonPatterns": [
      "Quick status updates and check-ins",
      "Incident coordination and resolution"
    ]
  },
  "roles": [
    {
      "title": "Software Engineer",
      "responsibilities": ["Write and review code", "Design system architecture"],
      "commonChannels": ["#engineering", "#backend"]
    }
  ],
  "fileTemplates": [
    { "type": "pdf", "name": "Incident Response Runbook.pdf", "size": "1.8 MB" },
    { "type": "code", "name": "config.yaml", "size": "8 KB" }
  ],
  "groupDMs": [
    {
      "id": "group-1",
      "name": "Priya, James, Kenji",
      "members": ["Priya Patel", "James Wilson", "Kenji Tanaka"]
    }
  ]
}
"##
}

/// Pinned welcome post for `#general`.
pub fn welcome_announcement(company_name: &str) -> String {
    format!(
        "<strong>🎉 Welcome to {company_name}!</strong><br><br>
We're excited to have you here! This is our main communication channel where we share company-wide updates, announcements, and important information.<br><br>
<strong>Quick Links:</strong><br>
• Check out our team channels for department-specific discussions<br>
• Review pinned messages for important resources<br>
• Don't hesitate to ask questions - we're here to help!<br><br>
Looking forward to working together! 🚀"
    )
}

pub fn platform_announcement() -> &'static str {
    "<strong>📱 Platform Updates & Feature Releases</strong><br><br>
We're constantly improving our platform to deliver the best experience for our users. Here's what's new:<br><br>
<strong>Recent Updates:</strong><br>
• Enhanced content discovery algorithm<br>
• Improved video playback performance<br>
• New creator tools and analytics dashboard<br>
• Better moderation and safety features<br><br>
Have feedback or feature requests? Share them in #product! 💡"
}

pub fn operations_announcement() -> &'static str {
    "<strong>🛒 Operations & Inventory Updates</strong><br><br>
Keeping you informed about our daily operations:<br><br>
<strong>Current Status:</strong><br>
• Inventory levels healthy across all warehouses<br>
• Shipping times within target SLAs<br>
• Customer service response times improved<br>
• New fulfillment centers coming online next quarter<br><br>
For specific operational questions, check #operations! 📦"
}

pub fn healthcare_announcement() -> &'static str {
    "<strong>🏥 Important Updates & Reminders</strong><br><br>
Key information for our team:<br><br>
<strong>This Week:</strong><br>
• Updated compliance protocols effective immediately<br>
• New patient care guidelines available in resources<br>
• Staff training sessions scheduled<br>
• Equipment maintenance completed<br><br>
Please review all updates and reach out with any questions! 📋"
}

pub fn roadmap_announcement() -> &'static str {
    "<strong>🚀 Q2 Strategic Initiatives</strong><br><br>
We're excited to share our roadmap for this quarter:<br><br>
<strong>Focus Areas:</strong><br>
• Platform scalability and performance improvements<br>
• New feature development and user experience enhancements<br>
• Infrastructure upgrades for better reliability<br>
• Team growth and expansion<br><br>
We'll be hosting an all-hands meeting next Friday to dive deeper. Looking forward to your questions and feedback! 💪"
}

pub fn new_hires_announcement(engineering: u32, product: u32, operations: u32) -> String {
    format!(
        "<strong>👥 Welcome Our New Team Members!</strong><br><br>
We're thrilled to welcome new colleagues who joined us this month across various departments. Please make them feel welcome!<br><br>
<strong>New Hires:</strong><br>
• Engineering: {engineering} new team members<br>
• Product & Design: {product} new team members<br>
• Operations: {operations} new team members<br><br>
They'll be introducing themselves in their respective team channels. Welcome lunch details to follow! 🎉"
    )
}
